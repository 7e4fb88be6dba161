//! Conversions from engine aggregates to HTTP bodies.

use chrono::NaiveDate;

use api_types::{
    PlanningStatus,
    board::{BoardRow, BoardView, DayView},
    member::MemberView,
    planning::{AssigneeView, DateGroupView, PlanningView},
    profile::ProfileView,
    service::ServiceView,
};

use crate::ServerError;

pub(crate) fn status_to_api(status: engine::PlanningStatus) -> PlanningStatus {
    match status {
        engine::PlanningStatus::Planned => PlanningStatus::Planned,
        engine::PlanningStatus::InProgress => PlanningStatus::InProgress,
        engine::PlanningStatus::Completed => PlanningStatus::Completed,
        engine::PlanningStatus::Cancelled => PlanningStatus::Cancelled,
    }
}

pub(crate) fn status_from_api(status: PlanningStatus) -> Result<engine::PlanningStatus, ServerError> {
    Ok(engine::PlanningStatus::try_from(status.as_str())?)
}

pub(crate) fn service(service: engine::Service) -> ServiceView {
    ServiceView {
        id: service.id,
        name: service.name,
        display_name: service.display_name,
        emoji: service.emoji,
        description: service.description,
        is_active: service.is_active,
    }
}

pub(crate) fn profile(profile: engine::Profile) -> ProfileView {
    ProfileView {
        id: profile.id,
        display_name: profile.display_name().to_string(),
        full_name: profile.full_name,
        email: profile.email,
        role: profile.role,
    }
}

pub(crate) fn member(view: &engine::MemberView) -> MemberView {
    MemberView {
        id: view.member.id,
        user_id: view.member.user_id,
        display_name: view.display_name().to_string(),
        joined_at: view.member.joined_at,
        notes: view.member.notes.clone(),
        added_by: view.member.added_by.clone(),
    }
}

pub(crate) fn planning(view: &engine::PlanningView) -> PlanningView {
    let planning = &view.planning;
    PlanningView {
        id: planning.id,
        date: planning.date,
        task: planning.task.clone(),
        status: status_to_api(planning.status),
        status_label: planning.status.label().to_string(),
        notes: planning.notes.clone(),
        created_by: planning.created_by.clone(),
        updated_at: planning.updated_at,
        assignees: view
            .assignments
            .iter()
            .map(|a| AssigneeView {
                person_id: a.assignment.member_id,
                display_name: a.display_name().to_string(),
                resolved: a.profile.is_some(),
                individual_status: status_to_api(a.assignment.individual_status),
            })
            .collect(),
    }
}

pub(crate) fn date_group(group: &engine::DateGroup) -> DateGroupView {
    DateGroupView {
        date: group.date,
        plannings: group.plannings.iter().map(planning).collect(),
    }
}

pub(crate) fn board(board: &engine::PlanningBoard, today: NaiveDate) -> Result<BoardView, ServerError> {
    let today_column = board.today_column(today);
    let axis = board
        .axis
        .iter()
        .enumerate()
        .map(|(index, date)| DayView {
            date: *date,
            in_week: board.week.contains(date),
            is_today: today_column == Some(index),
        })
        .collect();

    let rows = board
        .members
        .iter()
        .enumerate()
        .map(|(index, view)| BoardRow {
            member: member(view),
            cells: board
                .row(index)
                .into_iter()
                .map(|cell| cell.map(|p| p.planning.id))
                .collect(),
        })
        .collect();

    Ok(BoardView {
        service_id: board.service_id,
        anchor: board.anchor,
        previous_anchor: board.previous_anchor()?,
        next_anchor: board.next_anchor()?,
        axis,
        rows,
        plannings: board.plannings.iter().map(planning).collect(),
    })
}
