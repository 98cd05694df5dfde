//! Terminal rendering of employee cards, statistics and drafts.

use simpeg_core::{Employee, EmployeeForm, Statistics};

/// Renders one employee card with the fields the registry list shows.
pub fn render_card(employee: &Employee) -> String {
    format!(
        "#{} {}\n   NIK: {}\n   Telepon: {}\n   Koordinat: {:.4}, {:.4}\n   Status: {}\n   Pendidikan: {}",
        employee.id,
        employee.nama,
        employee.nik,
        employee.telepon,
        employee.latitude,
        employee.longitude,
        employee.status_keluarga.label(),
        employee.pendidikan.label(),
    )
}

/// Renders the card list, one blank line between cards.
pub fn render_list(employees: &[Employee]) -> String {
    employees
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the dashboard statistics block.
pub fn render_stats(stats: &Statistics) -> String {
    let average = stats
        .average_education
        .map(|level| level.label())
        .unwrap_or("-");
    format!(
        "Total Karyawan       : {}\nMenikah              : {}\nBelum Menikah        : {}\nRata-rata Pendidikan : {}",
        stats.total, stats.married, stats.single, average
    )
}

/// Renders a saved draft with its wire field names.
pub fn render_form(form: &EmployeeForm) -> String {
    format!(
        "nik: {}\nnama: {}\ntelepon: {}\nlatitude: {}\nlongitude: {}\nstatusKeluarga: {}\npendidikan: {}\npendidikanLainnya: {}",
        form.nik,
        form.nama,
        form.telepon,
        form.latitude,
        form.longitude,
        form.status_keluarga,
        form.pendidikan,
        form.pendidikan_lainnya
    )
}
