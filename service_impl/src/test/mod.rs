#[cfg(test)]
pub mod shift;
