mod errors;
mod fixtures;
mod properties;
