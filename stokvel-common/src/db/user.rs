use chrono::Utc;
use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::db::{DaoError, DbThreadPool};
use crate::models::user::{NewUser, User};
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn create_user(
        &self,
        name: &str,
        surname: &str,
        email: &str,
        phone_number: &str,
        profile_image_url: Option<&str>,
        language_preference: &str,
    ) -> Result<i32, DaoError> {
        let new_user = NewUser {
            name,
            surname,
            email,
            phone_number,
            profile_image_url,
            language_preference,
            created_at: Utc::now().naive_utc(),
        };

        Ok(dsl::insert_into(users)
            .values(&new_user)
            .returning(user_fields::id)
            .get_result::<i32>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_user(&self, user_id: i32) -> Result<User, DaoError> {
        Ok(users
            .find(user_id)
            .get_result::<User>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_all_users(&self) -> Result<Vec<User>, DaoError> {
        Ok(users
            .order(user_fields::id.asc())
            .get_results::<User>(&mut self.db_thread_pool.get()?)?)
    }
}
