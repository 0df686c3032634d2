use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use sweeper_optimizer::json::types::JsonSchedule;

pub fn schedule_table(schedule: &JsonSchedule) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Work order",
            "Crew",
            "Vehicles",
            "Start",
            "End",
            "Sand volume",
        ]);

    let mut assignments = schedule.assignments.iter().collect::<Vec<_>>();
    assignments.sort_by_key(|assignment| (assignment.crew, assignment.start_time));

    for assignment in assignments {
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| String::from("-"));

        table.add_row(vec![
            assignment.work_order_id.clone(),
            or_dash(assignment.crew.map(|crew| crew.to_string())),
            assignment.vehicle_ids.join(", "),
            or_dash(assignment.start_time.map(|start| start.to_string())),
            or_dash(assignment.end_time.map(|end| end.to_string())),
            assignment.sand_volume.to_string(),
        ]);
    }

    table
}

pub fn analysis_table(schedule: &JsonSchedule) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Constraint", "Score"]);

    for entry in &schedule.analysis {
        table.add_row(vec![entry.constraint.clone(), entry.score.to_string()]);
    }
    table.add_row(vec![String::from("total"), schedule.score.to_string()]);

    table
}
