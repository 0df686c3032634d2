pub mod back_to_back_constraint;
pub mod constraint;
pub mod constraint_params;
pub mod no_overlap_constraint;
pub mod pair_constraint;
pub mod sand_cleaning_constraint;
pub mod shift_time_constraint;
pub mod vehicle_capacity_constraint;
pub mod weekend_break_constraint;
pub mod work_order_constraint;
