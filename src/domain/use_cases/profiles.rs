use crate::{
    entities::profile::{
        Pagination, Profile, ProfileCreatedResponse, ProfileInsert, ProfileListResponse,
        ProfilePayload, ProfileUpdatedResponse,
    },
    errors::AppError,
    repositories::profile::ProfileRepository,
};

pub struct ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
}

impl<R> ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R) -> Self {
        ProfileHandler { profile_repo }
    }

    /// Validates and persists a new profile. Validation runs before any
    /// store access, so a rejected payload never reaches the repository.
    pub async fn create_profile(
        &self,
        payload: ProfilePayload,
    ) -> Result<ProfileCreatedResponse, AppError> {
        let insert = ProfileInsert::try_from(payload)?;
        let id = self.profile_repo.create(&insert).await?;

        Ok(ProfileCreatedResponse {
            message: "Profile created successfully".to_string(),
            id,
        })
    }

    /// Returns one page window plus pagination metadata. The total comes
    /// from a separate count query, so it is correct even on a partial or
    /// empty page. The two queries are independent round trips; a write
    /// landing between them is accepted (no snapshot guarantee).
    pub async fn list_profiles(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<ProfileListResponse, AppError> {
        let page = page.max(1);
        let limit = limit.max(1);

        let data = self.profile_repo.get_page(page, limit).await?;
        let total_profiles = self.profile_repo.total_count().await?;

        Ok(ProfileListResponse {
            data,
            pagination: page_meta(total_profiles, page, limit),
        })
    }

    /// Unpaginated: the full match set comes back in one response. An
    /// empty term is not special-cased here (it matches everything by the
    /// empty-substring rule); the clear-search shortcut belongs to the
    /// client.
    pub async fn search_profiles(&self, term: &str) -> Result<Vec<Profile>, AppError> {
        self.profile_repo.search(term).await
    }

    pub async fn get_profile(&self, id: i64) -> Result<Profile, AppError> {
        self.profile_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// Full-record overwrite; there are no partial updates.
    pub async fn update_profile(
        &self,
        id: i64,
        payload: ProfilePayload,
    ) -> Result<ProfileUpdatedResponse, AppError> {
        let insert = ProfileInsert::try_from(payload)?;
        self.profile_repo.update(id, &insert).await?;

        Ok(ProfileUpdatedResponse {
            message: "Profile updated successfully".to_string(),
        })
    }
}

/// Pagination metadata for a page window over `total_profiles` rows.
pub fn page_meta(total_profiles: u64, current_page: u32, limit: u32) -> Pagination {
    let limit = u64::from(limit.max(1));
    let total_pages = (total_profiles.div_ceil(limit)) as u32;

    Pagination {
        current_page,
        total_pages,
        total_profiles,
        has_next_page: current_page < total_pages,
        has_prev_page: current_page > 1,
    }
}
