/// eng
/// The module takes as input a vector of reaction equations specified as strings
/// ("A + 2*B -> 1.5*C") and produces the following data:
/// 1) the stoichiometric matrix (species x reactions) with signed net coefficients
/// 2) the species index {species name: row}, rows numbered by first appearance
/// 3) matrices of reactant-side and product-side coefficients
///
/// Note:
/// a species found on both sides of one reaction (autocatalysis, "A + B -> 2*B") gets a single
/// net entry: product coefficient minus reactant coefficient.
/// A malformed equation (two arrows, bad coefficient, empty side) aborts the whole call.
/// ----------------------------------------------------------------
/// # Examples
/// ```
/// use ARTools::Kinetics::stoichiometry_matrix::StoichAnalyzer;
/// let reactions = vec!["C + O2 -> CO2", "C + CO2 -> 2*CO"];
/// let mut analyzer = StoichAnalyzer::with_reactions(&reactions);
/// analyzer.analyse_reactions().unwrap();
/// assert_eq!(analyzer.substances, vec!["C", "O2", "CO2", "CO"]);
/// assert_eq!(analyzer.stoich_matrix[(3, 1)], 2.0);
/// analyzer.pretty_print();
/// ```
pub mod stoichiometry_matrix;
