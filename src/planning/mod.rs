//! Goal-level calculators composed from the formula engine

mod fire;
mod cover;
mod housing;
mod pension;

pub use fire::{fire_plan, FireInputs, FirePlan, DEFAULT_WITHDRAWAL_RATE_PERCENT};
pub use cover::{life_cover_need, LifeCoverInputs, LifeCoverNeed};
pub use housing::{
    home_affordability, rent_vs_buy, Affordability, AffordabilityInputs, RentVsBuy, RentVsBuyInputs,
    RentVsBuyYear, MAX_DEBT_TO_INCOME,
};
pub use pension::{
    nps_pension, PensionInputs, PensionProjection, DEFAULT_ANNUITY_RATE_PERCENT,
    DEFAULT_ANNUITY_SHARE_PERCENT,
};
