//! Planning aggregation: the member × date matrix of the weekly view and the
//! by-date grouping of the flat list view.
//!
//! Both are pure functions over already-fetched collections.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Assignment, Member, Planning, Profile, ResultEngine, calendar, profiles::UNKNOWN_PROFILE_NAME,
};

/// An active membership with its profile, when the lookup succeeded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub member: Member,
    pub profile: Option<Profile>,
}

impl MemberView {
    /// Identifier of the underlying person.
    pub fn person_id(&self) -> Uuid {
        self.member.user_id
    }

    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map_or(UNKNOWN_PROFILE_NAME, Profile::display_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub assignment: Assignment,
    /// `None` when the profile lookup failed; the assignment then counts as
    /// unassigned in the matrix.
    pub profile: Option<Profile>,
}

impl AssignmentView {
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map_or(UNKNOWN_PROFILE_NAME, Profile::display_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningView {
    pub planning: Planning,
    pub assignments: Vec<AssignmentView>,
}

impl PlanningView {
    /// Person ids whose profile was resolved.
    pub fn assignee_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.assignments
            .iter()
            .filter_map(|a| a.profile.as_ref().map(|p| p.id))
    }

    pub fn is_assigned_to(&self, person_id: Uuid) -> bool {
        self.assignee_ids().any(|id| id == person_id)
    }
}

/// Cell `[member][date]` holds the index of the planning shown there.
type Cells = Vec<Vec<Option<usize>>>;

/// Resolves every `(member, date)` cell to the zero-or-one planning dated
/// `date` and assigned to the member's person id. When several plannings
/// compete for a cell the first in `plannings` order wins.
pub fn build_matrix(
    members: &[MemberView],
    axis: &[NaiveDate],
    plannings: &[PlanningView],
) -> Vec<Vec<Option<usize>>> {
    let mut lookup: HashMap<(NaiveDate, Uuid), usize> = HashMap::new();
    for (index, view) in plannings.iter().enumerate() {
        for person_id in view.assignee_ids() {
            lookup.entry((view.planning.date, person_id)).or_insert(index);
        }
    }

    members
        .iter()
        .map(|member| {
            axis.iter()
                .map(|date| lookup.get(&(*date, member.person_id())).copied())
                .collect()
        })
        .collect()
}

/// One day of the flat list view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub plannings: Vec<PlanningView>,
}

/// Groups plannings by date, most recent date first. Plannings keep their
/// relative order within a day; unassigned plannings are kept.
pub fn group_by_date(plannings: &[PlanningView]) -> Vec<DateGroup> {
    let mut groups: BTreeMap<NaiveDate, Vec<PlanningView>> = BTreeMap::new();
    for view in plannings {
        groups
            .entry(view.planning.date)
            .or_default()
            .push(view.clone());
    }
    groups
        .into_iter()
        .rev()
        .map(|(date, plannings)| DateGroup { date, plannings })
        .collect()
}

/// The weekly planning view of one service.
#[derive(Clone, Debug)]
pub struct PlanningBoard {
    pub service_id: Uuid,
    pub anchor: NaiveDate,
    /// Monday-to-Sunday week around `anchor`.
    pub week: Vec<NaiveDate>,
    /// `week` united with every planning date, ascending.
    pub axis: Vec<NaiveDate>,
    pub members: Vec<MemberView>,
    pub plannings: Vec<PlanningView>,
    cells: Cells,
}

impl PlanningBoard {
    pub fn build(
        service_id: Uuid,
        anchor: NaiveDate,
        members: Vec<MemberView>,
        plannings: Vec<PlanningView>,
    ) -> Self {
        let week = calendar::week_dates(anchor);
        let axis = calendar::resolve_axis(&week, plannings.iter().map(|p| p.planning.date));
        let cells = build_matrix(&members, &axis, &plannings);
        Self {
            service_id,
            anchor,
            week,
            axis,
            members,
            plannings,
            cells,
        }
    }

    pub fn cell(&self, member_index: usize, date_index: usize) -> Option<&PlanningView> {
        let index = (*self.cells.get(member_index)?.get(date_index)?)?;
        self.plannings.get(index)
    }

    /// Looks a cell up by membership id and date.
    pub fn cell_for(&self, member_id: Uuid, date: NaiveDate) -> Option<&PlanningView> {
        let member_index = self.members.iter().position(|m| m.member.id == member_id)?;
        let date_index = self.axis.iter().position(|d| *d == date)?;
        self.cell(member_index, date_index)
    }

    /// Cells of one member, aligned with `axis`.
    pub fn row(&self, member_index: usize) -> Vec<Option<&PlanningView>> {
        (0..self.axis.len())
            .map(|date_index| self.cell(member_index, date_index))
            .collect()
    }

    /// Axis column of `today`, when displayed.
    pub fn today_column(&self, today: NaiveDate) -> Option<usize> {
        self.axis.iter().position(|d| *d == today)
    }

    pub fn populated_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn previous_anchor(&self) -> ResultEngine<NaiveDate> {
        calendar::shift_weeks(self.anchor, -1)
    }

    pub fn next_anchor(&self) -> ResultEngine<NaiveDate> {
        calendar::shift_weeks(self.anchor, 1)
    }
}
