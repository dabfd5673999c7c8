// main.rs - Grid animation that reveals one cell at a time

use anyhow::Context;
use gridloop::{LoopConfig, Variant};

fn main() -> anyhow::Result<()> {
    gridloop::init_logging();
    gridloop::run(LoopConfig::for_variant(Variant::Reveal)).context("gridloop-reveal failed")
}
