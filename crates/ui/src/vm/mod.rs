mod cohort_vm;
mod markdown_vm;
mod quiz_vm;
mod time_fmt;

pub use cohort_vm::{
    CohortCardVm, CohortSnapshotVm, FOCUS_PREVIEW_LEN, PaperCardVm, map_cohort_cards,
    map_cohort_snapshot, map_paper_cards,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{
    DigestRowVm, ModeTabVm, NavCellVm, OptionState, OptionVm, PrimaryAction, QuestionCardVm,
    QuizPanelVm, ResultVm, TimerVm, URGENT_THRESHOLD_SECS, map_quiz_panel, mode_tab_label,
};
pub use time_fmt::{format_countdown, format_elapsed};
