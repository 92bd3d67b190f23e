pub mod m202505290001_create_users;
pub mod m202505290002_create_courses;
pub mod m202505290003_create_user_course_roles;
pub mod m202505290004_create_assignments;
pub mod m202505290005_create_non_container_questions;
