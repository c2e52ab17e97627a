pub mod entities;
pub mod services;

#[cfg(test)]
pub mod test_support;
