pub mod checkin;
pub mod registry;
pub mod voucher;
