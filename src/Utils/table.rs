use nalgebra::DMatrix;
use prettytable::{Cell, Row, Table};

/// Table with one row per species and one column per reaction (R1, R2, ...).
pub fn stoich_table(matrix: &DMatrix<f64>, substances: &[String]) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("species")];
    header.extend((1..=matrix.ncols()).map(|j| Cell::new(&format!("R{}", j))));
    table.add_row(Row::new(header));
    for (i, substance) in substances.iter().enumerate().take(matrix.nrows()) {
        let mut cells = vec![Cell::new(substance)];
        cells.extend(
            matrix
                .row(i)
                .iter()
                .map(|value| Cell::new(&value.to_string())),
        );
        table.add_row(Row::new(cells));
    }
    table
}
