use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    DatabaseConnection, DbErr, QueryFilter, QueryOrder, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    Assignment, EngineError, Member, MemberStatus, NewAssignment, NewMember, NewPlanning,
    NewProfile, NewService, Planning, Profile, ResultEngine, Service, planning_assignments,
    plannings, profiles, service_members, services,
};

use super::RecordStore;

/// [`RecordStore`] backed by a sea-orm connection.
#[derive(Clone, Debug)]
pub struct SeaOrmStore {
    database: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

fn missing_row(err: DbErr, what: &str) -> EngineError {
    match err {
        DbErr::RecordNotUpdated => EngineError::KeyNotFound(format!("{what} not exists")),
        other => other.into(),
    }
}

#[async_trait]
impl RecordStore for SeaOrmStore {
    async fn list_services(&self, active_only: bool) -> ResultEngine<Vec<Service>> {
        let mut query = services::Entity::find().order_by_asc(services::Column::DisplayName);
        if active_only {
            query = query.filter(services::Column::IsActive.eq(true));
        }
        query
            .all(&self.database)
            .await?
            .into_iter()
            .map(Service::try_from)
            .collect()
    }

    async fn get_service(&self, id: Uuid) -> ResultEngine<Option<Service>> {
        services::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Service::try_from)
            .transpose()
    }

    async fn insert_service(&self, new: NewService) -> ResultEngine<Service> {
        let service = new.into_service(Uuid::new_v4());
        services::ActiveModel::from(&service)
            .insert(&self.database)
            .await?;
        Ok(service)
    }

    async fn update_service(&self, service: &Service) -> ResultEngine<()> {
        services::ActiveModel::from(service)
            .update(&self.database)
            .await
            .map_err(|err| missing_row(err, "service"))?;
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> ResultEngine<Option<Profile>> {
        profiles::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Profile::try_from)
            .transpose()
    }

    async fn list_profiles(&self) -> ResultEngine<Vec<Profile>> {
        profiles::Entity::find()
            .order_by_asc(profiles::Column::FullName)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Profile::try_from)
            .collect()
    }

    async fn insert_profile(&self, new: NewProfile) -> ResultEngine<Profile> {
        let profile = new.into_profile(Uuid::new_v4());
        profiles::ActiveModel::from(&profile)
            .insert(&self.database)
            .await?;
        Ok(profile)
    }

    async fn list_members(
        &self,
        service_id: Uuid,
        status: Option<MemberStatus>,
    ) -> ResultEngine<Vec<Member>> {
        let mut query = service_members::Entity::find()
            .filter(service_members::Column::ServiceId.eq(service_id.to_string()))
            .order_by_asc(service_members::Column::JoinedAt);
        if let Some(status) = status {
            query = query.filter(service_members::Column::Status.eq(status.as_str()));
        }
        query
            .all(&self.database)
            .await?
            .into_iter()
            .map(Member::try_from)
            .collect()
    }

    async fn get_member(&self, id: Uuid) -> ResultEngine<Option<Member>> {
        service_members::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Member::try_from)
            .transpose()
    }

    async fn insert_member(&self, new: NewMember) -> ResultEngine<Member> {
        let member = new.into_member(Uuid::new_v4(), Utc::now());
        service_members::ActiveModel::from(&member)
            .insert(&self.database)
            .await?;
        Ok(member)
    }

    async fn set_member_status(&self, id: Uuid, status: MemberStatus) -> ResultEngine<()> {
        let result = service_members::Entity::update_many()
            .col_expr(service_members::Column::Status, Expr::value(status.as_str()))
            .filter(service_members::Column::Id.eq(id.to_string()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("member not exists".to_string()));
        }
        Ok(())
    }

    async fn list_plannings(&self, service_id: Uuid) -> ResultEngine<Vec<Planning>> {
        plannings::Entity::find()
            .filter(plannings::Column::ServiceId.eq(service_id.to_string()))
            .order_by_desc(plannings::Column::Date)
            .order_by_asc(plannings::Column::CreatedAt)
            .order_by_asc(plannings::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Planning::try_from)
            .collect()
    }

    async fn get_planning(&self, id: Uuid) -> ResultEngine<Option<Planning>> {
        plannings::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Planning::try_from)
            .transpose()
    }

    async fn insert_planning(&self, new: NewPlanning) -> ResultEngine<Planning> {
        let planning = new.into_planning(Uuid::new_v4(), Utc::now());
        plannings::ActiveModel::from(&planning)
            .insert(&self.database)
            .await?;
        Ok(planning)
    }

    async fn update_planning(&self, planning: &Planning) -> ResultEngine<()> {
        plannings::ActiveModel::from(planning)
            .update(&self.database)
            .await
            .map_err(|err| missing_row(err, "planning"))?;
        Ok(())
    }

    async fn delete_planning(&self, id: Uuid) -> ResultEngine<()> {
        plannings::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn list_assignments(&self, planning_id: Uuid) -> ResultEngine<Vec<Assignment>> {
        planning_assignments::Entity::find()
            .filter(planning_assignments::Column::PlanningId.eq(planning_id.to_string()))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Assignment::try_from)
            .collect()
    }

    async fn insert_assignment(&self, new: NewAssignment) -> ResultEngine<Assignment> {
        let assignment = new.into_assignment(Uuid::new_v4());
        planning_assignments::ActiveModel::from(&assignment)
            .insert(&self.database)
            .await?;
        Ok(assignment)
    }

    async fn delete_assignments(&self, planning_id: Uuid) -> ResultEngine<u64> {
        let result = planning_assignments::Entity::delete_many()
            .filter(planning_assignments::Column::PlanningId.eq(planning_id.to_string()))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected)
    }
}
