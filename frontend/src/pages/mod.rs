pub mod area_landing;
pub mod home;
