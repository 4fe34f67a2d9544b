/// Helpers around the stoichiometric matrix: comparison up to row permutation,
/// loading reaction lists from text files, table output.
pub mod load_from_file;
pub mod matrix_compare;
pub mod table;
