use chrono::NaiveDate;
use serde_json::Value;
use taskplan::project::Project;
use taskplan::workplan::build_workplan;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

const COMPLETE: &str = r#"{
    "project": {"name": "The project", "start": "2020-12-21"},
    "resources": [
        {"id": "dev1", "name": "Developer 1"},
        {"id": "dev2", "name": "Developer 2"}
    ],
    "tasks": [
        {"id": "task1", "title": "The first task", "duration": 2},
        {"id": "task2", "title": "The second task", "duration": 5, "max_resources": 3},
        {"id": "task3", "title": "The third task", "duration": 10}
    ]
}"#;

fn scenario_project() -> Project {
    let mut project = Project::from_json_str(COMPLETE).unwrap();
    project
        .calendar
        .add_holidays(&[date(2020, 12, 25), date(2021, 1, 1)]);
    project
}

#[test]
fn report_carries_the_plan_summary() {
    let best = build_workplan(&scenario_project());
    let report = best.report();

    assert_eq!(report.project.name, "The project");
    assert_eq!(report.project.start, date(2020, 12, 21));
    assert_eq!(report.project.end, date(2021, 1, 4));
    assert_eq!(report.project.duration, 9);
    assert_eq!(report.project.holidays_region, None);
    assert_eq!(
        report.project.holidays,
        vec![date(2020, 12, 25), date(2021, 1, 1)]
    );

    assert_eq!(report.resources.len(), 2);
    assert_eq!(report.resources[0].id, "dev1");
    assert_eq!(report.resources[0].duration, 8);
    assert_eq!(report.resources[0].end, Some(date(2020, 12, 31)));
    assert_eq!(report.resources[1].duration, 9);

    // The task section lists the working list, after splitting.
    let titles: Vec<&str> = report
        .tasks
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "The first task",
            "The second task (1/2)",
            "The second task (2/2)",
            "The third task (1/2)",
            "The third task (2/2)",
        ]
    );
}

#[test]
fn report_serializes_to_json() {
    let best = build_workplan(&scenario_project());
    let json = best.report().to_json_string().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["project"]["name"], "The project");
    assert_eq!(value["project"]["start"], "2020-12-21");
    assert_eq!(value["project"]["end"], "2021-01-04");
    assert_eq!(value["project"]["duration"], 9);
    assert_eq!(value["project"]["holidays"][0], "2020-12-25");
    assert_eq!(value["resources"][0]["assigned"][0]["task_id"], "task3");
    assert_eq!(value["resources"][0]["assigned"][0]["days"], 5);
    assert_eq!(value["resources"][1]["assigned_tasks"][1]["id"], "task1");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 5);
}

#[test]
fn report_end_matches_latest_resource_end() {
    let best = build_workplan(&scenario_project());
    let report = best.report();
    let latest = report
        .resources
        .iter()
        .filter_map(|resource| resource.end)
        .max()
        .unwrap();
    assert_eq!(report.project.end, latest);
}
