/// Presentation module
///
/// - list.rs: the paginated, sortable book table
/// - editor.rs: the detail/edit form panel
/// - binder.rs: the explicit form-field binding table
/// - upload.rs: cover picking and the data-URL codec

pub mod binder;
pub mod editor;
pub mod list;
pub mod upload;
