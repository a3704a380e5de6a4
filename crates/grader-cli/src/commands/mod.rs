pub mod console;
pub mod dispatch;
pub mod embed;
pub mod grade;
pub mod health;
pub mod latency;
pub mod load;
pub mod shared;
pub mod upload_pdf;
