pub mod invoices;
pub mod items;
pub mod taxes;
