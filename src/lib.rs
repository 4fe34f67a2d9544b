#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod Utils;
pub mod settings;

pub use Kinetics::stoichiometry_matrix::{StoichAnalyzer, StoichError, build, build_with_settings};
pub use Utils::matrix_compare::same_rows;
