pub mod dispatch;
pub mod serve;
pub mod tools;
pub mod validate;
