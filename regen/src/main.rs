// main.rs - Grid animation that recolors every cell once a second

use anyhow::Context;
use gridloop::{LoopConfig, Variant};

fn main() -> anyhow::Result<()> {
    gridloop::init_logging();
    gridloop::run(LoopConfig::for_variant(Variant::Regen)).context("gridloop-regen failed")
}
