use chrono::{NaiveDateTime, Utc};
use diesel::associations::GroupedBy;
use diesel::{dsl, BelongingToDsl, ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::db::{DaoError, DbThreadPool};
use crate::models::meeting::{Meeting, MeetingStatus, NewMeeting};
use crate::models::meeting_user::{InviteStatus, MeetingUser, NewMeetingUser};
use crate::models::user::User;
use crate::schema::meeting_users as meeting_user_fields;
use crate::schema::meeting_users::dsl::meeting_users;
use crate::schema::meetings as meeting_fields;
use crate::schema::meetings::dsl::meetings;
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

/// Field set for a meeting about to be created. The meeting's status is
/// always Scheduled at creation, so it is not part of the details.
#[derive(Debug)]
pub struct MeetingDetails<'a> {
    pub title: &'a str,
    pub agenda: Option<&'a str>,
    pub organizer_id: i32,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub recurrence: &'a str,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub recurrence_group_id: Option<&'a str>,
    pub location: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// AND-composed listing filters. `None` means no constraint for that
/// dimension.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeetingFilters {
    pub user_id: Option<i32>,
    pub status: Option<MeetingStatus>,
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub struct MeetingWithInvitees {
    pub meeting: Meeting,
    pub organizer: User,
    pub invitees: Vec<(MeetingUser, User)>,
}

#[derive(Debug)]
pub struct DeletedSeries {
    pub deleted_count: usize,
    pub title: String,
    pub recurrence: String,
    pub range_start: NaiveDateTime,
    pub range_end: NaiveDateTime,
}

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    /// Creates a meeting and fans out one invite row per invitee in a
    /// single transaction. When `invitee_ids` is `None`, every user
    /// known at creation time is invited; an explicit list narrows the
    /// fan-out (ids that match no user are dropped). The organizer is
    /// always invited and starts out Accepted; everyone else starts
    /// out Pending.
    pub fn create_meeting(
        &self,
        details: &MeetingDetails,
        invitee_ids: Option<&[i32]>,
    ) -> Result<i32, DaoError> {
        let new_meeting = NewMeeting {
            title: details.title,
            agenda: details.agenda,
            organizer_id: details.organizer_id,
            start_datetime: details.start_datetime,
            end_datetime: details.end_datetime,
            created_at: Utc::now().naive_utc(),
            status: MeetingStatus::Scheduled,
            recurrence: details.recurrence,
            recurrence_end_date: details.recurrence_end_date,
            recurrence_group_id: details.recurrence_group_id,
            location: details.location,
            notes: details.notes,
        };

        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                let organizer_exists = dsl::select(dsl::exists(
                    users.filter(user_fields::id.eq(details.organizer_id)),
                ))
                .get_result::<bool>(conn)?;

                if !organizer_exists {
                    return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
                }

                let meeting_id = dsl::insert_into(meetings)
                    .values(&new_meeting)
                    .returning(meeting_fields::id)
                    .get_result::<i32>(conn)?;

                let mut resolved_invitee_ids = match invitee_ids {
                    Some(requested) => {
                        let found = users
                            .select(user_fields::id)
                            .filter(user_fields::id.eq_any(requested))
                            .get_results::<i32>(conn)?;

                        let dropped_count = requested
                            .iter()
                            .filter(|id| !found.contains(id))
                            .count();
                        if dropped_count != 0 {
                            log::warn!(
                                "Dropped {dropped_count} invitee id(s) matching no user for \
                                 meeting \"{}\"",
                                details.title,
                            );
                        }

                        found
                    }
                    None => users.select(user_fields::id).get_results::<i32>(conn)?,
                };

                if !resolved_invitee_ids.contains(&details.organizer_id) {
                    resolved_invitee_ids.push(details.organizer_id);
                }

                let invite_rows = resolved_invitee_ids
                    .iter()
                    .map(|&user_id| NewMeetingUser {
                        meeting_id,
                        user_id,
                        invite_status: if user_id == details.organizer_id {
                            InviteStatus::Accepted
                        } else {
                            InviteStatus::Pending
                        },
                        attended: false,
                    })
                    .collect::<Vec<_>>();

                dsl::insert_into(meeting_users)
                    .values(&invite_rows)
                    .execute(conn)?;

                Ok(meeting_id)
            })
    }

    /// Lists meetings matching `filters`, newest start time first, each
    /// expanded with its organizer and full invitee set.
    pub fn get_meetings(
        &self,
        filters: MeetingFilters,
    ) -> Result<Vec<MeetingWithInvitees>, DaoError> {
        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .read_only()
            .run::<_, DaoError, _>(|conn| {
                let mut query = meetings.inner_join(users).into_boxed();

                if let Some(status) = filters.status {
                    query = query.filter(meeting_fields::status.eq(status));
                }

                if let Some(date_from) = filters.date_from {
                    query = query.filter(meeting_fields::start_datetime.ge(date_from));
                }

                if let Some(date_to) = filters.date_to {
                    query = query.filter(meeting_fields::end_datetime.le(date_to));
                }

                if let Some(user_id) = filters.user_id {
                    query = query.filter(
                        meeting_fields::id.eq_any(
                            meeting_users
                                .filter(meeting_user_fields::user_id.eq(user_id))
                                .select(meeting_user_fields::meeting_id),
                        ),
                    );
                }

                let meetings_with_organizers = query
                    .order(meeting_fields::start_datetime.desc())
                    .load::<(Meeting, User)>(conn)?;

                let loaded_meetings = meetings_with_organizers
                    .iter()
                    .map(|(meeting, _)| meeting.clone())
                    .collect::<Vec<Meeting>>();

                let grouped_invitees = MeetingUser::belonging_to(&loaded_meetings)
                    .inner_join(users)
                    .load::<(MeetingUser, User)>(conn)?
                    .grouped_by(&loaded_meetings);

                Ok(meetings_with_organizers
                    .into_iter()
                    .zip(grouped_invitees)
                    .map(|((meeting, organizer), invitees)| MeetingWithInvitees {
                        meeting,
                        organizer,
                        invitees,
                    })
                    .collect())
            })
    }

    /// Overwrites the invite status for one (meeting, user) pair. Any
    /// status may replace any other.
    pub fn update_invite_status(
        &self,
        meeting_id: i32,
        user_id: i32,
        status: InviteStatus,
    ) -> Result<(), DaoError> {
        let affected_row_count = dsl::update(meeting_users.find((meeting_id, user_id)))
            .set(meeting_user_fields::invite_status.eq(status))
            .execute(&mut self.db_thread_pool.get()?)?;

        if affected_row_count == 0 {
            return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
        }

        Ok(())
    }

    pub fn invite_exists(&self, meeting_id: i32, user_id: i32) -> Result<bool, DaoError> {
        Ok(
            dsl::select(dsl::exists(meeting_users.find((meeting_id, user_id))))
                .get_result::<bool>(&mut self.db_thread_pool.get()?)?,
        )
    }

    /// Marks a meeting Cancelled. Idempotent; invite rows are left
    /// untouched.
    pub fn cancel_meeting(&self, meeting_id: i32) -> Result<(), DaoError> {
        let affected_row_count = dsl::update(meetings.find(meeting_id))
            .set(meeting_fields::status.eq(MeetingStatus::Cancelled))
            .execute(&mut self.db_thread_pool.get()?)?;

        if affected_row_count == 0 {
            return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
        }

        Ok(())
    }

    /// Deletes a meeting and its invite rows. The cascade is explicit:
    /// invite rows go first, then the meeting, in one transaction.
    pub fn delete_meeting(&self, meeting_id: i32) -> Result<(), DaoError> {
        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                diesel::delete(
                    meeting_users.filter(meeting_user_fields::meeting_id.eq(meeting_id)),
                )
                .execute(conn)?;

                let affected_row_count =
                    diesel::delete(meetings.find(meeting_id)).execute(conn)?;

                if affected_row_count == 0 {
                    return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
                }

                Ok(())
            })
    }

    /// Deletes every meeting sharing `recurrence_group_id`, along with
    /// their invite rows, and reports what was removed.
    pub fn delete_series(&self, recurrence_group_id: &str) -> Result<DeletedSeries, DaoError> {
        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                let series = meetings
                    .filter(meeting_fields::recurrence_group_id.eq(recurrence_group_id))
                    .order(meeting_fields::start_datetime.asc())
                    .load::<Meeting>(conn)?;

                let Some(first_occurrence) = series.first() else {
                    return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
                };

                let meeting_ids = series.iter().map(|m| m.id).collect::<Vec<i32>>();

                diesel::delete(
                    meeting_users.filter(meeting_user_fields::meeting_id.eq_any(&meeting_ids)),
                )
                .execute(conn)?;

                diesel::delete(meetings.filter(meeting_fields::id.eq_any(&meeting_ids)))
                    .execute(conn)?;

                let range_end = series
                    .iter()
                    .map(|m| m.end_datetime)
                    .fold(first_occurrence.end_datetime, NaiveDateTime::max);

                Ok(DeletedSeries {
                    deleted_count: series.len(),
                    title: first_occurrence.title.clone(),
                    recurrence: first_occurrence.recurrence.clone(),
                    range_start: first_occurrence.start_datetime,
                    range_end,
                })
            })
    }
}
