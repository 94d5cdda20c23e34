use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Username,
    Avatar,
    Cover,
    ReferralCode,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Subscription {
    Table,
    Id,
    SenderUserId,
    RecipientUserId,
    Provider,
    Status,
    ExpiresAt,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ReferralCodeUsage {
    Table,
    Id,
    UsedBy,
    ReferralCode,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Wallet {
    Table,
    Id,
    UserId,
    Total,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum UserList {
    Table,
    Id,
    UserId,
    Name,
    Type,
}

#[derive(Iden, Clone)]
pub enum UserListMember {
    Table,
    Id,
    ListId,
    UserId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum UserDevice {
    Table,
    Id,
    UserId,
    Signature,
    VerifiedAt,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Setting {
    Table,
    Key,
    Value,
}
