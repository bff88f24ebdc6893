use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "calchat")]
#[command(about = "Scheduling chatbot bridging an LLM and the Cal.com API", long_about = None)]
pub struct Args {
    #[arg(long = "host", default_value = "127.0.0.1", help = "Address to bind")]
    pub host: String,

    #[arg(short = 'p', long = "port", default_value_t = 8000, help = "Port to listen on")]
    pub port: u16,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,
}
