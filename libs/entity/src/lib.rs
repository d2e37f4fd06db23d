pub mod contact_submission;
pub mod social_post;
pub mod social_stats;
pub mod static_content;
pub mod user;

pub mod prelude {
    pub use crate::contact_submission::ContactSubmission as ContactSubmissionEntity;
    pub use crate::social_post::{Platform, SocialPost as SocialPostEntity};
    pub use crate::social_stats::{
        PlatformStats as PlatformStatsEntity,
        SocialMediaStats as SocialMediaStatsEntity,
    };
    pub use crate::static_content::StaticContent as StaticContentEntity;
    pub use crate::user::User as UserEntity;
}
