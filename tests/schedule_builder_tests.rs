use chrono::{NaiveDate, Weekday};
use plan_schedule::{
    Plan, PlanDocument, Task, VacationCalendar, VacationRange, WorkCalendar, WorkCalendarConfig,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bob_plan() -> Plan {
    Plan::new(
        d(2024, 3, 4),
        vec![
            Task::new("task1", 2.0, "bob").with_completion(50),
            Task::new("task2", 1.0, "bob"),
        ],
        WorkCalendar::default(),
    )
    .unwrap()
}

#[test]
fn bob_tasks_run_back_to_back() {
    let schedule = bob_plan().schedule();
    let rows = schedule.rows();

    assert_eq!(rows[0].start_offset, 0.0);
    assert_eq!(rows[0].start_date, d(2024, 3, 4));
    assert_eq!(rows[0].end_date, d(2024, 3, 5));

    assert_eq!(rows[1].start_offset, 2.0);
    assert_eq!(rows[1].start_date, d(2024, 3, 6));
    assert_eq!(rows[1].end_date, d(2024, 3, 6));

    let summary = schedule.summary();
    assert_eq!(summary.total_man_days, 3.0);
    assert_eq!(summary.completed_man_days, 1.0);
    assert!((summary.completion_ratio * 100.0 - 33.33).abs() < 0.01);
}

#[test]
fn scheduling_is_idempotent() {
    let plan = bob_plan();
    assert_eq!(plan.schedule(), plan.schedule());
    assert!(plan.tasks().iter().all(|t| t.start_offset.is_none()));
}

#[test]
fn alice_waits_out_her_vacation() {
    let vacations =
        VacationCalendar::from_ranges(&[VacationRange::single_day("alice", d(2024, 1, 2))]);
    let plan = Plan::new(
        d(2024, 1, 1),
        vec![
            Task::new("first", 1.0, "alice"),
            Task::new("second", 1.5, "alice"),
        ],
        WorkCalendar::new(vacations),
    )
    .unwrap();

    let schedule = plan.schedule();
    let rows = schedule.rows();
    assert_eq!(rows[0].start_date, d(2024, 1, 1));
    assert_eq!(rows[0].end_date, d(2024, 1, 1));
    assert_eq!(rows[1].start_date, d(2024, 1, 3));
    // offset 2.5 rounds down to the second advance: Wed then Thu
    assert_eq!(rows[1].end_date, d(2024, 1, 4));
}

#[test]
fn fractional_efforts_share_a_day() {
    let plan = Plan::new(
        d(2024, 3, 4),
        vec![
            Task::new("a", 0.5, "bob"),
            Task::new("b", 0.5, "bob"),
            Task::new("c", 1.0, "bob"),
        ],
        WorkCalendar::default(),
    )
    .unwrap();
    let schedule = plan.schedule();
    let dates: Vec<_> = schedule
        .rows()
        .iter()
        .map(|r| (r.start_date, r.end_date))
        .collect();
    assert_eq!(
        dates,
        vec![
            (d(2024, 3, 4), d(2024, 3, 4)),
            (d(2024, 3, 4), d(2024, 3, 4)),
            (d(2024, 3, 5), d(2024, 3, 5)),
        ]
    );
}

#[test]
fn filtering_to_unknown_assignee_yields_zero_totals() {
    let schedule = bob_plan().schedule().filtered("nobody");
    assert!(schedule.is_empty());
    let summary = schedule.summary();
    assert_eq!(summary.total_man_days, 0.0);
    assert_eq!(summary.completed_man_days, 0.0);
    assert_eq!(summary.completion_ratio, 0.0);
}

#[test]
fn assignee_summaries_keep_first_seen_order() {
    let text = "\
项目开始时间: 2024-03-04
* a -- 2 [bob]<50%>
* b -- 1 [alice]<100%>
* c -- 1 [bob]
";
    let plan = Plan::from_document(PlanDocument::parse(text).unwrap()).unwrap();
    let summaries = plan.schedule().assignee_summaries().unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].assignee, "bob");
    assert_eq!(summaries[0].tasks, 2);
    assert_eq!(summaries[0].man_days, 3.0);
    assert_eq!(summaries[0].completed_man_days, 1.0);
    assert_eq!(summaries[0].first_start, d(2024, 3, 4));
    assert_eq!(summaries[0].last_end, d(2024, 3, 6));

    assert_eq!(summaries[1].assignee, "alice");
    assert_eq!(summaries[1].completed_man_days, 1.0);
    assert_eq!(summaries[1].last_end, d(2024, 3, 4));
}

#[test]
fn invalid_task_is_rejected_when_building_a_plan() {
    let result = Plan::new(
        d(2024, 3, 4),
        vec![Task::new("bad", -1.0, "bob")],
        WorkCalendar::default(),
    );
    assert!(result.is_err());
}

#[test]
fn six_day_week_schedules_onto_saturday() {
    let text = "\
项目开始时间: 2024-03-08
* a -- 1 [bob]
* b -- 1 [bob]
";
    let six_days = WorkCalendarConfig::new([
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ])
    .unwrap();

    let plan =
        Plan::from_document_with_config(PlanDocument::parse(text).unwrap(), &six_days).unwrap();
    let schedule = plan.schedule();
    assert_eq!(schedule.rows()[1].start_date, d(2024, 3, 9));
    assert_eq!(schedule.calendar_config().working_days().len(), 6);

    let default_plan = Plan::from_document(PlanDocument::parse(text).unwrap()).unwrap();
    assert_eq!(default_plan.schedule().rows()[1].start_date, d(2024, 3, 11));
}
