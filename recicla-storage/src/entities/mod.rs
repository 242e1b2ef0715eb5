pub mod deliveries;
pub mod users;

pub use deliveries::{
    ActiveModel as DeliveryActiveModel, Column as DeliveryColumn, Entity as Deliveries, Model as DeliveryModel,
};
pub use users::{ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users, Model as UserModel};
