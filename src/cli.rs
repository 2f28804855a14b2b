use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(version = version(), about = "A terminal flappy-bird arcade game")]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Simulation ticks per second",
        default_value_t = 60.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frames per second",
        default_value_t = 60.0
    )]
    pub frame_rate: f64,

    #[arg(short, long, value_name = "INT", help = "Fixed seed for the pipe generator")]
    pub seed: Option<u64>,
}
