pub use board::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod seen_set;
