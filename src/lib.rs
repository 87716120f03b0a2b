pub mod queue;
pub mod queueing;
pub mod sim;

#[cfg(test)]
mod test;
