//! Dashboard messages

use lab_dashboard_core::SortColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMessage {
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,

    /// Enter: expand/collapse a domain, open/close a lab
    Confirm,

    NewInstance,
    /// Open the creation form pre-filled from the selected domain
    CloneInstance,
    Delete,

    NextPage,
    PreviousPage,
    CyclePageSize,
    SortBy(SortColumn),

    /// Copy the selected lab's details to the clipboard
    CopyLab,
    /// Save the selected lab's details to the download directory
    DownloadLab,
}
