use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Renders a synthesizer waveform RAM dump as an annotated bitmap")]
pub struct Args {
    #[arg(short, long, long_help = "The raw waveform table dump to render.\nExample: raw_waveforms", default_value = "raw_waveforms")]
    pub input_file: String,
    #[arg(short, long, long_help = "The output bitmap image.\nExample: waveform.bmp", default_value = "waveform.bmp")]
    pub output_file: String,
}
