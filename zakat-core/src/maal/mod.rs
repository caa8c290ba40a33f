pub mod business;
pub mod income;
pub mod investments;
pub mod precious_metals;
pub mod retirement;
pub mod savings;
