use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use u_fermat::medium::RefractiveIndex;
use u_fermat::relax::ensemble::{EnsembleMember, ErrorSummary};
use u_fermat::snell::SnellMeasurement;
use u_fermat::trajectory::Trajectory;
use u_fermat::FermatResult;

const BAR_WIDTH: usize = 40;

/// Horizontal bar whose length tracks `y` within `[lo, hi]`.
fn height_bar(y: f64, lo: f64, hi: f64) -> String {
    let span = hi - lo;
    let filled = if span > 0.0 {
        (((y - lo) / span) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(BAR_WIDTH);
    format!("{}●", "─".repeat(filled))
}

/// Prints the trajectory point by point, rotated so x runs down the
/// table and y grows to the right. The row at the interface is marked.
pub fn print_trajectory<I: RefractiveIndex + ?Sized>(
    title: &str,
    path: &Trajectory,
    medium: &I,
    boundary: f64,
) {
    println!("\n{}", title);

    let lo = path.y().iter().copied().fold(f64::INFINITY, f64::min);
    let hi = path.y().iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let crossing = path.last_at_or_before(boundary);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("i").add_attribute(Attribute::Bold),
        Cell::new("x coordinate").add_attribute(Attribute::Bold),
        Cell::new("y coordinate").add_attribute(Attribute::Bold),
        Cell::new("n(x)"),
        Cell::new(format!("y  [{:.2} .. {:.2}]", lo, hi)),
    ]);

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, (x, y)) in path.points().enumerate() {
        let mut bar = Cell::new(height_bar(y, lo, hi));
        let mut label = Cell::new(i);
        if Some(i) == crossing {
            bar = bar.fg(Color::Red);
            label = label.fg(Color::Red).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            label,
            Cell::new(format!("{:.4}", x)),
            Cell::new(format!("{:.4}", y)),
            Cell::new(format!("{:.3}", medium.index_at(x))),
            bar,
        ]);
    }
    println!("{}", table);
    println!("interface at x = {:.4} (highlighted row)", boundary);
}

/// The four validation lines: angles in degrees, then the relative error.
pub fn print_snell(m: &SnellMeasurement) {
    println!("incident: {}", m.incidence_degrees());
    println!("refracted: {}", m.refraction_degrees());
    println!("theoretical: {}", m.theoretical_refraction_degrees());
    println!("%error {}", m.percent_error);
}

pub fn print_ensemble(members: &[EnsembleMember], measurements: &[FermatResult<SnellMeasurement>]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Seed").add_attribute(Attribute::Bold),
        Cell::new("Iter"),
        Cell::new("Stop"),
        Cell::new("Incident°"),
        Cell::new("Refracted°"),
        Cell::new("Theory°").fg(Color::Cyan),
        Cell::new("%Err").add_attribute(Attribute::Bold),
    ]);

    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (member, measurement) in members.iter().zip(measurements) {
        let mut row = vec![
            Cell::new(member.seed).add_attribute(Attribute::Bold),
            Cell::new(member.result.iterations),
            Cell::new(format!("{:?}", member.result.stop_reason)),
        ];
        match measurement {
            Ok(m) => row.extend([
                Cell::new(format!("{:.3}", m.incidence_degrees())),
                Cell::new(format!("{:.3}", m.refraction_degrees())),
                Cell::new(format!("{:.3}", m.theoretical_refraction_degrees())).fg(Color::Cyan),
                Cell::new(format!("{:.2}", m.percent_error)).add_attribute(Attribute::Bold),
            ]),
            Err(e) => row.push(Cell::new(e.to_string()).fg(Color::Red)),
        }
        table.add_row(row);
    }
    println!("\n{}", table);
}

pub fn print_error_summary(s: &ErrorSummary) {
    println!(
        "\n%error over {} members: mean {:.3}, min {:.3}, max {:.3} ({} degenerate)",
        s.measured, s.mean_percent_error, s.min_percent_error, s.max_percent_error, s.failures
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_bar_extremes() {
        assert_eq!(height_bar(0.0, 0.0, 10.0), "●");
        assert_eq!(height_bar(10.0, 0.0, 10.0).chars().count(), BAR_WIDTH + 1);
    }

    #[test]
    fn test_height_bar_flat_path() {
        assert_eq!(height_bar(3.0, 3.0, 3.0), "●");
    }
}
