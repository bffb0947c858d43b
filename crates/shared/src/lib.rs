//! Vocabulary shared by the evaluation-form hosts: domain enums, date
//! normalization, and the wire contract of the evaluation service.

pub mod dates;
pub mod domain;
pub mod protocol;
