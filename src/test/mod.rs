mod simulator;
mod stats;
