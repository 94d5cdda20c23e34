mod referral_code_usage;
mod setting;
mod subscription;
mod user;
mod user_device;
mod user_list;
mod user_list_member;
mod wallet;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "creatorhub",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateUk1,
        user::CreateUk2,
        subscription::CreateTable,
        subscription::CreateIdx1,
        referral_code_usage::CreateTable,
        referral_code_usage::CreateIdx1,
        wallet::CreateTable,
        user_list::CreateTable,
        user_list::CreateIdx1,
        user_list_member::CreateTable,
        user_list_member::CreateIdx1,
        user_device::CreateTable,
        setting::CreateTable
    ]
);
