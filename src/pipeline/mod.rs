pub mod stage1_extract;
pub mod stage2_layout;
pub mod stage3_aggregate;
pub mod stage4_rank;
pub mod stage5_stats;
pub mod stage6_report;
