//! Production API resources other than files.
//!
//! Every resource offers `show` and `index` against its collection; delivery
//! numbers and print order statuses can also be written back.

pub mod country;
pub mod delivery_number;
pub mod print_data;
pub mod print_order;
pub mod print_order_status;

pub use country::Country;
pub use delivery_number::DeliveryNumber;
pub use print_data::PrintData;
pub use print_order::PrintOrder;
pub use print_order_status::{State, Status};
