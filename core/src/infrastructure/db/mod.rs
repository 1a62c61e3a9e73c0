pub mod postgres;

#[cfg(test)]
pub(crate) mod testing;
