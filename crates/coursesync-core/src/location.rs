//! Location items: display-ready projections of file attachments
//!
//! A lesson shows its attachments as a list of "locations" (title, link and a
//! coarse kind used to pick an icon). The projection is a pure function of the
//! file list and is recomputed whenever that list changes.

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::types::{FileAttachment, FileId};

/// Coarse content category of an attachment, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Document,
    Image,
    Video,
    Audio,
    Archive,
    Link,
}

impl LocationKind {
    /// Classify a file name or URL path by its extension.
    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" | "doc" | "docx" | "ppt" | "pptx" | "xls" | "xlsx" | "txt" | "md" | "odt" => {
                LocationKind::Document
            }
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "bmp" => LocationKind::Image,
            "mp4" | "mov" | "mkv" | "webm" | "avi" => LocationKind::Video,
            "mp3" | "wav" | "ogg" | "flac" | "m4a" => LocationKind::Audio,
            "zip" | "rar" | "7z" | "tar" | "gz" => LocationKind::Archive,
            _ => LocationKind::Link,
        }
    }
}

/// One attachment as the lesson view renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationItem {
    pub file_id: FileId,
    pub title: String,
    pub href: String,
    pub kind: LocationKind,
}

impl LocationItem {
    pub fn from_attachment(file: &FileAttachment) -> Self {
        let file_name = file_name_from_reference(&file.file);
        let title = file
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| file_name.clone())
            .unwrap_or_else(|| format!("File {}", file.id));

        Self {
            file_id: file.id,
            title,
            href: file.file.clone(),
            kind: LocationKind::from_path(file_name.as_deref().unwrap_or_default()),
        }
    }
}

/// Project a lesson's file list into its location items, preserving order.
pub fn project_locations(files: &[FileAttachment]) -> Vec<LocationItem> {
    files.iter().map(LocationItem::from_attachment).collect()
}

/// Last path segment of a file reference with query and fragment removed,
/// percent-decoded.
fn file_name_from_reference(reference: &str) -> Option<String> {
    let path = reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let segment = path.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() || segment.ends_with(':') {
        return None;
    }
    Some(percent_decode_str(segment).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(id: u64, name: Option<&str>, file: &str) -> FileAttachment {
        FileAttachment {
            id: FileId(id),
            name: name.map(str::to_string),
            file: file.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_title_prefers_explicit_name() {
        let item = LocationItem::from_attachment(&attachment(
            1,
            Some("Week 1 slides"),
            "https://cdn.test/media/slides_w1.pdf",
        ));
        assert_eq!(item.title, "Week 1 slides");
        assert_eq!(item.kind, LocationKind::Document);
        assert_eq!(item.href, "https://cdn.test/media/slides_w1.pdf");
    }

    #[test]
    fn test_title_falls_back_to_decoded_file_name() {
        let item = LocationItem::from_attachment(&attachment(
            2,
            Some("   "),
            "https://cdn.test/media/Lab%20Sheet.docx?token=abc",
        ));
        assert_eq!(item.title, "Lab Sheet.docx");
        assert_eq!(item.kind, LocationKind::Document);
    }

    #[test]
    fn test_title_falls_back_to_id_without_file_name() {
        let item = LocationItem::from_attachment(&attachment(3, None, "https://"));
        assert_eq!(item.title, "File 3");
        assert_eq!(item.kind, LocationKind::Link);
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(LocationKind::from_path("photo.JPG"), LocationKind::Image);
        assert_eq!(LocationKind::from_path("talk.mp4"), LocationKind::Video);
        assert_eq!(LocationKind::from_path("song.mp3"), LocationKind::Audio);
        assert_eq!(LocationKind::from_path("code.zip"), LocationKind::Archive);
        assert_eq!(LocationKind::from_path("README"), LocationKind::Link);
    }

    #[test]
    fn test_projection_preserves_order_and_length() {
        let files = vec![
            attachment(5, None, "https://cdn.test/b.png"),
            attachment(4, None, "https://cdn.test/a.pdf"),
        ];
        let items = project_locations(&files);
        let ids: Vec<_> = items.iter().map(|i| i.file_id).collect();
        assert_eq!(ids, vec![FileId(5), FileId(4)]);
    }

    #[test]
    fn test_projection_of_empty_list_is_empty() {
        assert!(project_locations(&[]).is_empty());
    }
}
