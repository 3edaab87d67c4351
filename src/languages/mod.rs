// Language registrations
//
// Each module supplies a `support()` describing one language: the grammar
// constructor, the node-type classification table, and the strategy set for
// native context extraction. The registry builds each of these exactly once.

pub mod go;
pub mod javascript;
pub mod python;
pub mod rust;
