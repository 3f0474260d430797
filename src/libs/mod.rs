pub mod anchor;
pub mod contig;
pub mod error;
pub mod io;
pub mod partition;
pub mod tour;
