use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::RecordScope;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::ticket_repository::TicketRepository;
use crate::application::ports::train_repository::TrainRepository;
use crate::application::ports::trainstation_repository::TrainstationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::comments::comment::{Comment, CommentPatch, CommentSort, NewComment};
use crate::domain::listing::ListQuery;
use crate::domain::posts::post::{NewPost, Post, PostPatch, PostSort, Reaction};
use crate::domain::tickets::ticket::{NewTicket, Ticket, TicketSort};
use crate::domain::trains::train::{NewTrain, Train, TrainPatch, TrainSort};
use crate::domain::trainstations::trainstation::{
    NewTrainstation, Trainstation, TrainstationPatch, TrainstationSort,
};
use crate::domain::users::user::{NewUser, Role, User, UserPatch, UserSort};

use super::table::{MemoryTable, SortableBy, sorted_page};

fn mark_deleted(deleted_at: &mut Option<DateTime<Utc>>, updated_at: &mut DateTime<Utc>) {
    let now = Utc::now();
    *deleted_at = Some(now);
    *updated_at = now;
}

// ---- users ----

#[derive(Default)]
pub struct MemoryUserRepository {
    table: MemoryTable<User>,
}

// Soft-deleted accounts keep their pseudo and email reserved.
fn user_conflict(existing: &User, candidate: &User) -> Option<&'static str> {
    if existing.pseudo == candidate.pseudo {
        Some("pseudo")
    } else if existing.email == candidate.email {
        Some("email")
    } else {
        None
    }
}

impl SortableBy<UserSort> for User {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn compare_by(&self, other: &Self, field: UserSort) -> Ordering {
        match field {
            UserSort::Pseudo => self.pseudo.cmp(&other.pseudo),
            UserSort::Email => self.email.cmp(&other.email),
            UserSort::Role => self.role.cmp(&other.role),
            UserSort::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            pseudo: user.pseudo.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: Role::User,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.table.insert_unique(row, user_conflict).await
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<User>> {
        Ok(self.table.find(id, scope).await)
    }

    async fn find_by_email(
        &self,
        email: &str,
        scope: RecordScope,
    ) -> anyhow::Result<Option<User>> {
        Ok(self
            .table
            .select(scope, |u| u.email == email)
            .await
            .into_iter()
            .next())
    }

    async fn list(&self, query: &ListQuery<UserSort>) -> anyhow::Result<Vec<User>> {
        let rows = self.table.select(RecordScope::Active, |_| true).await;
        Ok(sorted_page(rows, query))
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> anyhow::Result<Option<User>> {
        self.table
            .update_unique(
                id,
                RecordScope::Active,
                |u| {
                    patch.apply_to(u);
                    u.updated_at = Utc::now();
                },
                user_conflict,
            )
            .await
    }

    async fn set_role(&self, id: Uuid, role: Role) -> anyhow::Result<Option<User>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |u| {
                u.role = role;
                u.updated_at = Utc::now();
            })
            .await)
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |u| {
                mark_deleted(&mut u.deleted_at, &mut u.updated_at)
            })
            .await
            .is_some())
    }
}

// ---- trainstations ----

#[derive(Default)]
pub struct MemoryTrainstationRepository {
    table: MemoryTable<Trainstation>,
}

impl SortableBy<TrainstationSort> for Trainstation {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn compare_by(&self, other: &Self, field: TrainstationSort) -> Ordering {
        match field {
            TrainstationSort::Name => self.name.cmp(&other.name),
            TrainstationSort::OpenHour => self.open_hour.cmp(&other.open_hour),
            TrainstationSort::CloseHour => self.close_hour.cmp(&other.close_hour),
        }
    }
}

#[async_trait]
impl TrainstationRepository for MemoryTrainstationRepository {
    async fn create(&self, station: &NewTrainstation) -> anyhow::Result<Trainstation> {
        let now = Utc::now();
        Ok(self
            .table
            .insert(Trainstation {
                id: Uuid::new_v4(),
                name: station.name.clone(),
                open_hour: station.open_hour.clone(),
                close_hour: station.close_hour.clone(),
                image: station.image.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .await)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Option<Trainstation>> {
        Ok(self.table.find(id, scope).await)
    }

    async fn list(&self, query: &ListQuery<TrainstationSort>) -> anyhow::Result<Vec<Trainstation>> {
        let rows = self.table.select(RecordScope::Active, |_| true).await;
        Ok(sorted_page(rows, query))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &TrainstationPatch,
    ) -> anyhow::Result<Option<Trainstation>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |s| {
                patch.apply_to(s);
                s.updated_at = Utc::now();
            })
            .await)
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |s| {
                mark_deleted(&mut s.deleted_at, &mut s.updated_at)
            })
            .await
            .is_some())
    }
}

// ---- trains ----

#[derive(Default)]
pub struct MemoryTrainRepository {
    table: MemoryTable<Train>,
}

impl SortableBy<TrainSort> for Train {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn compare_by(&self, other: &Self, field: TrainSort) -> Ordering {
        match field {
            TrainSort::Name => self.name.cmp(&other.name),
            TrainSort::DepartureTime => self.departure_time.cmp(&other.departure_time),
            TrainSort::Active => self.active.cmp(&other.active),
            TrainSort::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[async_trait]
impl TrainRepository for MemoryTrainRepository {
    async fn create(&self, train: &NewTrain) -> anyhow::Result<Train> {
        let now = Utc::now();
        Ok(self
            .table
            .insert(Train {
                id: Uuid::new_v4(),
                name: train.name.clone(),
                start_station: train.start_station,
                end_station: train.end_station,
                departure_time: train.departure_time,
                active: true,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .await)
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Train>> {
        Ok(self.table.find(id, scope).await)
    }

    async fn list(&self, query: &ListQuery<TrainSort>) -> anyhow::Result<Vec<Train>> {
        let rows = self.table.select(RecordScope::Active, |_| true).await;
        Ok(sorted_page(rows, query))
    }

    async fn update(&self, id: Uuid, patch: &TrainPatch) -> anyhow::Result<Option<Train>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |t| {
                patch.apply_to(t);
                t.updated_at = Utc::now();
            })
            .await)
    }

    async fn set_active(
        &self,
        id: Uuid,
        active: bool,
        scope: RecordScope,
    ) -> anyhow::Result<Option<Train>> {
        Ok(self
            .table
            .update(id, scope, |t| {
                t.active = active;
                t.updated_at = Utc::now();
            })
            .await)
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |t| {
                mark_deleted(&mut t.deleted_at, &mut t.updated_at)
            })
            .await
            .is_some())
    }

    async fn ids_serving_station(
        &self,
        station_id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Vec<Uuid>> {
        Ok(self
            .table
            .select(scope, |t| t.serves(station_id))
            .await
            .into_iter()
            .map(|t| t.id)
            .collect())
    }
}

// ---- tickets ----

#[derive(Default)]
pub struct MemoryTicketRepository {
    table: MemoryTable<Ticket>,
}

impl SortableBy<TicketSort> for Ticket {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn compare_by(&self, other: &Self, field: TicketSort) -> Ordering {
        match field {
            TicketSort::CreatedAt => self.created_at.cmp(&other.created_at),
            // Unvalidated tickets sort after validated ones, as in PostgreSQL.
            TicketSort::ValidatedAt => match (self.validated_at, other.validated_at) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

#[async_trait]
impl TicketRepository for MemoryTicketRepository {
    async fn create(&self, ticket: &NewTicket) -> anyhow::Result<Ticket> {
        let now = Utc::now();
        Ok(self
            .table
            .insert(Ticket {
                id: Uuid::new_v4(),
                user_id: ticket.user_id,
                train_id: ticket.train_id,
                validated_at: None,
                created_at: now,
                updated_at: now,
            })
            .await)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Ticket>> {
        Ok(self.table.find(id, RecordScope::Active).await)
    }

    async fn list(&self, query: &ListQuery<TicketSort>) -> anyhow::Result<Vec<Ticket>> {
        let rows = self.table.select(RecordScope::Active, |_| true).await;
        Ok(sorted_page(rows, query))
    }

    async fn validate(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<Option<Ticket>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |t| t.validate(at))
            .await)
    }
}

// ---- posts ----

#[derive(Default)]
pub struct MemoryPostRepository {
    table: MemoryTable<Post>,
}

impl SortableBy<PostSort> for Post {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn compare_by(&self, other: &Self, field: PostSort) -> Ordering {
        match field {
            PostSort::Title => self.title.cmp(&other.title),
            PostSort::Likes => self.likes.cmp(&other.likes),
            PostSort::Dislikes => self.dislikes.cmp(&other.dislikes),
            PostSort::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: &NewPost) -> anyhow::Result<Post> {
        let now = Utc::now();
        Ok(self
            .table
            .insert(Post {
                id: Uuid::new_v4(),
                title: post.title.clone(),
                content: post.content.clone(),
                author_id: post.author_id,
                likes: 0,
                dislikes: 0,
                liked_by: Vec::new(),
                disliked_by: Vec::new(),
                tags: post.tags.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .await)
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Post>> {
        Ok(self.table.find(id, scope).await)
    }

    async fn list(&self, query: &ListQuery<PostSort>) -> anyhow::Result<Vec<Post>> {
        let rows = self.table.select(RecordScope::Active, |_| true).await;
        Ok(sorted_page(rows, query))
    }

    async fn update(&self, id: Uuid, patch: &PostPatch) -> anyhow::Result<Option<Post>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |p| {
                patch.apply_to(p);
                p.updated_at = Utc::now();
            })
            .await)
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |p| {
                mark_deleted(&mut p.deleted_at, &mut p.updated_at)
            })
            .await
            .is_some())
    }

    async fn react(
        &self,
        id: Uuid,
        user_id: Uuid,
        reaction: Reaction,
    ) -> anyhow::Result<Option<Post>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |p| {
                p.react(user_id, reaction);
                p.updated_at = Utc::now();
            })
            .await)
    }
}

// ---- comments ----

#[derive(Default)]
pub struct MemoryCommentRepository {
    table: MemoryTable<Comment>,
}

impl SortableBy<CommentSort> for Comment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn compare_by(&self, other: &Self, field: CommentSort) -> Ordering {
        match field {
            CommentSort::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, comment: &NewComment) -> anyhow::Result<Comment> {
        let now = Utc::now();
        Ok(self
            .table
            .insert(Comment {
                id: Uuid::new_v4(),
                content: comment.content.clone(),
                author_id: comment.author_id,
                post_id: comment.post_id,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .await)
    }

    async fn find_by_id(&self, id: Uuid, scope: RecordScope) -> anyhow::Result<Option<Comment>> {
        Ok(self.table.find(id, scope).await)
    }

    async fn list(&self, query: &ListQuery<CommentSort>) -> anyhow::Result<Vec<Comment>> {
        let rows = self.table.select(RecordScope::Active, |_| true).await;
        Ok(sorted_page(rows, query))
    }

    async fn list_for_post(
        &self,
        post_id: Uuid,
        scope: RecordScope,
    ) -> anyhow::Result<Vec<Comment>> {
        // Storage order is creation order.
        Ok(self.table.select(scope, |c| c.post_id == post_id).await)
    }

    async fn update(&self, id: Uuid, patch: &CommentPatch) -> anyhow::Result<Option<Comment>> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |c| {
                patch.apply_to(c);
                c.updated_at = Utc::now();
            })
            .await)
    }

    async fn soft_delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .table
            .update(id, RecordScope::Active, |c| {
                mark_deleted(&mut c.deleted_at, &mut c.updated_at)
            })
            .await
            .is_some())
    }
}
