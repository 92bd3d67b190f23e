pub mod assignment;
pub mod course;
pub mod non_container_question;
pub mod user;
pub mod user_course_role;

pub use assignment::Entity as Assignment;
pub use course::Entity as Course;
pub use non_container_question::Entity as NonContainerQuestion;
pub use user::Entity as User;
pub use user_course_role::Entity as UserCourseRole;
