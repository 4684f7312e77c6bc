use shared::domain::Employee;

const HEADERS: [&str; 4] = ["ID", "Name", "Email", "Role"];

fn cells(employee: &Employee) -> [&str; 4] {
    [
        employee.id.as_str(),
        &employee.name,
        &employee.email,
        &employee.role,
    ]
}

/// Plain-text table with one row per employee, columns padded to the widest
/// cell. An empty slice renders the same notice the GUI shows.
pub fn render_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees found.\n".to_string();
    }

    let mut widths = HEADERS.map(|header| header.chars().count());
    for employee in employees {
        for (width, cell) in widths.iter_mut().zip(cells(employee)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, HEADERS);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_row(&mut out, &widths, [&rule[0], &rule[1], &rule[2], &rule[3]]);
    for employee in employees {
        push_row(&mut out, &widths, cells(employee));
    }
    out
}

fn push_row(out: &mut String, widths: &[usize; 4], row: [&str; 4]) {
    let line: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
