//! Main-image and gallery management for the edit form.
//!
//! Every entry is either `Existing` (persisted on the server, addressed by
//! a remote id when it has one) or `New` (a locally staged file the server
//! has never seen). Removing an `Existing` entry records its id in the
//! deletion ledger that rides along with the save payload; removing a
//! `New` entry just discards the staged file.

use thiserror::Error;

use tradewind_core::ImageId;

/// Image types the platform accepts for upload.
const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Upload validation errors.
#[derive(Debug, Error)]
pub enum ImageError {
    /// One or more files in a batch have an unsupported type. The whole
    /// batch is rejected; the list names exactly the offending files.
    #[error("Unsupported image type: {}", .0.join(", "))]
    UnsupportedType(Vec<String>),
}

/// A locally staged file, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StagedImage {
    /// Stage a file for upload. The content type is derived from the file
    /// extension; validation happens when the file is added to the set.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = match extension(&file_name).as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            _ => "image/jpeg",
        };
        Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// A server-persisted image.
///
/// `remote_id` is absent on legacy rows; such images cannot be explicitly
/// marked for deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExistingImage {
    pub url: String,
    pub remote_id: Option<ImageId>,
}

/// A gallery entry as the shells render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Existing(ExistingImage),
    New(StagedImage),
}

/// The form's image state: one optional main image plus a gallery.
///
/// The gallery is addressed as the concatenation of existing images
/// (first) followed by staged ones; the save payload and the shells share
/// that ordering.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    main: Option<ImageRef>,
    existing: Vec<ExistingImage>,
    staged: Vec<StagedImage>,
    deleted_image_ids: Vec<ImageId>,
}

impl ImageSet {
    /// Build the set from server state at load time.
    #[must_use]
    pub fn from_server(main: Option<ExistingImage>, gallery: Vec<ExistingImage>) -> Self {
        Self {
            main: main.map(ImageRef::Existing),
            existing: gallery,
            staged: Vec::new(),
            deleted_image_ids: Vec::new(),
        }
    }

    /// The current main image, if any.
    #[must_use]
    pub const fn main(&self) -> Option<&ImageRef> {
        self.main.as_ref()
    }

    /// Gallery entries in display order: existing first, then staged.
    pub fn gallery(&self) -> impl Iterator<Item = ImageRef> + '_ {
        self.existing
            .iter()
            .cloned()
            .map(ImageRef::Existing)
            .chain(self.staged.iter().cloned().map(ImageRef::New))
    }

    /// Number of gallery entries (existing + staged).
    #[must_use]
    pub fn gallery_len(&self) -> usize {
        self.existing.len() + self.staged.len()
    }

    /// Ids of removed server images, accumulated over the session.
    #[must_use]
    pub fn deleted_image_ids(&self) -> &[ImageId] {
        &self.deleted_image_ids
    }

    /// Staged gallery files, in the order they were added.
    #[must_use]
    pub fn staged_gallery(&self) -> &[StagedImage] {
        &self.staged
    }

    /// The staged main image, if the main slot holds one.
    #[must_use]
    pub fn staged_main(&self) -> Option<&StagedImage> {
        match &self.main {
            Some(ImageRef::New(staged)) => Some(staged),
            _ => None,
        }
    }

    /// Replace the main image with a staged file.
    ///
    /// If an `Existing` main image was present, its id (when it has one)
    /// is recorded for deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedType`] if the file's extension is
    /// not an accepted image type; the current main image is untouched.
    pub fn set_main(&mut self, file: StagedImage) -> Result<(), ImageError> {
        validate_batch(std::slice::from_ref(&file))?;
        self.drop_main();
        self.main = Some(ImageRef::New(file));
        Ok(())
    }

    /// Remove the main image.
    ///
    /// An `Existing` main image records its id for deletion; a staged one
    /// is simply discarded since the server never saw it.
    pub fn remove_main(&mut self) {
        self.drop_main();
    }

    /// Add a batch of staged files to the gallery.
    ///
    /// All-or-nothing: if any file has an unsupported type the whole batch
    /// is rejected and the error names every offending file.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedType`] listing the invalid files.
    pub fn add_gallery_files(&mut self, files: Vec<StagedImage>) -> Result<(), ImageError> {
        validate_batch(&files)?;
        self.staged.extend(files);
        Ok(())
    }

    /// Remove the gallery entry at `index`.
    ///
    /// The index addresses the concatenation of existing images followed
    /// by staged ones. Removing an existing entry records its id (when
    /// present) for deletion. Out-of-range indexes are ignored.
    pub fn remove_gallery_at(&mut self, index: usize) {
        if index < self.existing.len() {
            let removed = self.existing.remove(index);
            if let Some(id) = removed.remote_id {
                self.deleted_image_ids.push(id);
            }
        } else if index - self.existing.len() < self.staged.len() {
            self.staged.remove(index - self.existing.len());
        }
    }

    fn drop_main(&mut self) {
        if let Some(ImageRef::Existing(existing)) = self.main.take()
            && let Some(id) = existing.remote_id
        {
            self.deleted_image_ids.push(id);
        }
    }
}

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

fn validate_batch(files: &[StagedImage]) -> Result<(), ImageError> {
    let invalid: Vec<String> = files
        .iter()
        .filter(|f| {
            extension(&f.file_name)
                .is_none_or(|ext| !ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        })
        .map(|f| f.file_name.clone())
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ImageError::UnsupportedType(invalid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str) -> StagedImage {
        StagedImage::new(name, vec![0xFF, 0xD8])
    }

    fn existing(url: &str, id: Option<&str>) -> ExistingImage {
        ExistingImage {
            url: url.to_string(),
            remote_id: id.map(ImageId::new),
        }
    }

    #[test]
    fn test_set_main_records_replaced_existing_id() {
        let mut set = ImageSet::from_server(Some(existing("a.jpg", Some("41"))), vec![]);
        set.set_main(staged("new.png")).expect("valid file");
        assert_eq!(set.deleted_image_ids(), &[ImageId::new("41")]);
        assert!(set.staged_main().is_some());
    }

    #[test]
    fn test_remove_staged_main_leaves_no_deletion_record() {
        let mut set = ImageSet::default();
        set.set_main(staged("new.jpg")).expect("valid file");
        set.remove_main();
        assert!(set.main().is_none());
        assert!(set.deleted_image_ids().is_empty());
    }

    #[test]
    fn test_remove_main_without_remote_id_records_nothing() {
        let mut set = ImageSet::from_server(Some(existing("legacy.jpg", None)), vec![]);
        set.remove_main();
        assert!(set.main().is_none());
        assert!(set.deleted_image_ids().is_empty());
    }

    #[test]
    fn test_batch_rejected_when_any_file_invalid() {
        let mut set = ImageSet::default();
        let err = set
            .add_gallery_files(vec![staged("a.jpg"), staged("b.bmp"), staged("c.png")])
            .unwrap_err();
        // No partial acceptance, and the error names exactly the bad file
        assert_eq!(set.gallery_len(), 0);
        assert_eq!(err.to_string(), "Unsupported image type: b.bmp");
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let mut set = ImageSet::default();
        set.add_gallery_files(vec![staged("a.JPG"), staged("b.Gif")])
            .expect("accepted");
        assert_eq!(set.gallery_len(), 2);
    }

    #[test]
    fn test_file_without_extension_is_rejected() {
        let mut set = ImageSet::default();
        let err = set.add_gallery_files(vec![staged("noext")]).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported image type: noext");
    }

    #[test]
    fn test_remove_gallery_existing_range_records_id() {
        let mut set = ImageSet::from_server(
            None,
            vec![existing("a.jpg", Some("1")), existing("b.jpg", None)],
        );
        set.add_gallery_files(vec![staged("c.jpg")]).expect("accepted");

        set.remove_gallery_at(0);
        assert_eq!(set.deleted_image_ids(), &[ImageId::new("1")]);
        assert_eq!(set.gallery_len(), 2);

        // The legacy row has no id to record
        set.remove_gallery_at(0);
        assert_eq!(set.deleted_image_ids().len(), 1);
        assert_eq!(set.gallery_len(), 1);
    }

    #[test]
    fn test_remove_gallery_staged_range_never_records() {
        let mut set = ImageSet::from_server(None, vec![existing("a.jpg", Some("1"))]);
        set.add_gallery_files(vec![staged("b.jpg"), staged("c.jpg")])
            .expect("accepted");

        // Index 1 falls past the existing range, so it addresses staged[0]
        set.remove_gallery_at(1);
        assert!(set.deleted_image_ids().is_empty());
        assert_eq!(set.staged_gallery().len(), 1);
        assert_eq!(set.staged_gallery()[0].file_name, "c.jpg");
    }

    #[test]
    fn test_remove_gallery_out_of_range_is_ignored() {
        let mut set = ImageSet::from_server(None, vec![existing("a.jpg", Some("1"))]);
        set.remove_gallery_at(5);
        assert_eq!(set.gallery_len(), 1);
        assert!(set.deleted_image_ids().is_empty());
    }

    #[test]
    fn test_gallery_order_is_existing_then_staged() {
        let mut set = ImageSet::from_server(None, vec![existing("a.jpg", Some("1"))]);
        set.add_gallery_files(vec![staged("b.jpg")]).expect("accepted");
        let entries: Vec<ImageRef> = set.gallery().collect();
        assert!(matches!(entries[0], ImageRef::Existing(_)));
        assert!(matches!(entries[1], ImageRef::New(_)));
    }
}
