//! Gallery view models.
//!
//! Turns an ordered run of upload records into presentable items: one render
//! plan (or a visible degraded state) per record, a delete affordance only in
//! admin mode, and at most one fullscreen slot. Records are presented in the
//! order delivered by the collaborator; the gallery never re-sorts.

use uuid::Uuid;

use pafolio_core::models::UploadRecord;
use pafolio_embed::{build_plan, PreviewWorkshop, RenderPlan, RenderStrategy};

/// Who is looking at the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The owner: delete affordances visible, intake available.
    Admin,
    /// The published read-only view: mutation affordances absent entirely.
    Public,
}

/// What an item displays: a concrete plan, or the degraded state when the
/// payload could not be prepared. Decode failures never take the gallery
/// down.
#[derive(Debug)]
pub enum ItemContent {
    Plan(RenderPlan),
    PreviewUnavailable { reason: String },
}

/// One rendered gallery entry.
#[derive(Debug)]
pub struct GalleryItem {
    pub record: UploadRecord,
    pub content: ItemContent,
    /// Absent (not merely disabled) in the public view.
    pub can_delete: bool,
    /// Escape hatch for framed sites that render blank under cross-origin
    /// restrictions: the original URL, offered for opening externally.
    pub open_external: Option<String>,
    /// Short per-strategy note the UI surfaces next to the preview.
    pub note: Option<&'static str>,
}

impl GalleryItem {
    fn build(record: UploadRecord, mode: ViewMode, workshop: &PreviewWorkshop) -> GalleryItem {
        let content = match build_plan(&record, workshop) {
            Ok(plan) => ItemContent::Plan(plan),
            Err(e) => {
                tracing::warn!(id = %record.id, error = %e, "Cannot prepare preview");
                ItemContent::PreviewUnavailable {
                    reason: e.to_string(),
                }
            }
        };

        let (open_external, note) = match &content {
            ItemContent::Plan(plan) => match plan.strategy() {
                RenderStrategy::GenericFrame => (
                    Some(record.payload.clone()),
                    Some("External sites may refuse framing; open the original if the frame stays blank."),
                ),
                RenderStrategy::DriveEmbed => (None, Some("Rendered via the drive host's preview.")),
                RenderStrategy::RemoteDocumentPreview => {
                    (None, Some("Rendered via the external document viewer; best effort."))
                }
                RenderStrategy::UnsupportedDownloadOnly => (
                    None,
                    Some("Word files attached directly cannot be previewed; download the file, or upload it to the drive host and attach the link instead."),
                ),
                _ => (None, None),
            },
            ItemContent::PreviewUnavailable { .. } => (None, None),
        };

        GalleryItem {
            can_delete: mode == ViewMode::Admin,
            open_external,
            note,
            record,
            content,
        }
    }

    pub fn id(&self) -> Uuid {
        self.record.id
    }
}

/// A rendered gallery: items in delivered order plus UI-only state.
#[derive(Debug)]
pub struct GalleryView {
    items: Vec<GalleryItem>,
    fullscreen: Option<Uuid>,
}

impl GalleryView {
    /// Build the view for a run of records. Plans are derived fresh here;
    /// any previous view's locally owned previews are released when the old
    /// view drops.
    pub fn build(
        records: Vec<UploadRecord>,
        mode: ViewMode,
        workshop: &PreviewWorkshop,
    ) -> GalleryView {
        let items = records
            .into_iter()
            .map(|record| GalleryItem::build(record, mode, workshop))
            .collect();
        GalleryView {
            items,
            fullscreen: None,
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Put an item fullscreen, replacing any current fullscreen item. False
    /// when the id is not in this view.
    pub fn set_fullscreen(&mut self, id: Uuid) -> bool {
        if self.items.iter().any(|item| item.id() == id) {
            self.fullscreen = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_fullscreen(&mut self) {
        self.fullscreen = None;
    }

    pub fn fullscreen_item(&self) -> Option<&GalleryItem> {
        let id = self.fullscreen?;
        self.items.iter().find(|item| item.id() == id)
    }

    /// Derive a fresh plan for the fullscreen record. Each call decodes anew
    /// so the fullscreen slot owns its preview independently of the list
    /// item's; the caller drops the returned plan to release it.
    pub fn fullscreen_plan(&self, workshop: &PreviewWorkshop) -> Option<ItemContent> {
        let item = self.fullscreen_item()?;
        Some(match build_plan(&item.record, workshop) {
            Ok(plan) => ItemContent::Plan(plan),
            Err(e) => ItemContent::PreviewUnavailable {
                reason: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pafolio_core::models::MediaKind;
    use tempfile::tempdir;

    fn record(kind: MediaKind, payload: &str) -> UploadRecord {
        UploadRecord {
            id: Uuid::new_v4(),
            indicator_id: "d1-1".to_string(),
            payload: payload.to_string(),
            media_kind: kind,
            created_at: Utc::now(),
            caption: "caption".to_string(),
            thumbnail_url: None,
        }
    }

    fn workshop() -> (tempfile::TempDir, PreviewWorkshop) {
        let dir = tempdir().unwrap();
        let ws = PreviewWorkshop::new(dir.path()).unwrap();
        (dir, ws)
    }

    #[test]
    fn items_keep_the_delivered_order() {
        let (_dir, ws) = workshop();
        let records = vec![
            record(MediaKind::Link, "https://example.com/z"),
            record(MediaKind::Link, "https://example.com/a"),
            record(MediaKind::Link, "https://example.com/m"),
        ];
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();

        let view = GalleryView::build(records, ViewMode::Admin, &ws);
        let item_ids: Vec<Uuid> = view.items().iter().map(|i| i.id()).collect();
        assert_eq!(item_ids, ids);
    }

    #[test]
    fn public_mode_hides_the_delete_affordance() {
        let (_dir, ws) = workshop();
        let records = vec![record(MediaKind::Link, "https://example.com/a")];

        let admin = GalleryView::build(records.clone(), ViewMode::Admin, &ws);
        assert!(admin.items()[0].can_delete);

        let public = GalleryView::build(records, ViewMode::Public, &ws);
        assert!(!public.items()[0].can_delete);
    }

    #[test]
    fn generic_frames_carry_the_escape_hatch() {
        let (_dir, ws) = workshop();
        let view = GalleryView::build(
            vec![record(MediaKind::Link, "https://example.com/blog")],
            ViewMode::Admin,
            &ws,
        );
        let item = &view.items()[0];
        assert_eq!(
            item.open_external.as_deref(),
            Some("https://example.com/blog")
        );
        assert!(item.note.is_some());
    }

    #[test]
    fn embeds_do_not_carry_the_escape_hatch() {
        let (_dir, ws) = workshop();
        let view = GalleryView::build(
            vec![record(MediaKind::Link, "https://youtu.be/dQw4w9WgXcQ")],
            ViewMode::Admin,
            &ws,
        );
        assert!(view.items()[0].open_external.is_none());
    }

    #[test]
    fn corrupt_inline_payloads_degrade_per_item() {
        let (_dir, ws) = workshop();
        let records = vec![
            record(MediaKind::DocumentPdf, "data:application/pdf;base64,@@@"),
            record(MediaKind::Link, "https://example.com/ok"),
        ];
        let view = GalleryView::build(records, ViewMode::Admin, &ws);

        assert!(matches!(
            view.items()[0].content,
            ItemContent::PreviewUnavailable { .. }
        ));
        // The rest of the gallery is unaffected.
        assert!(matches!(view.items()[1].content, ItemContent::Plan(_)));
    }

    #[test]
    fn fullscreen_holds_at_most_one_item() {
        let (_dir, ws) = workshop();
        let a = record(MediaKind::Link, "https://example.com/a");
        let b = record(MediaKind::Link, "https://example.com/b");
        let (a_id, b_id) = (a.id, b.id);

        let mut view = GalleryView::build(vec![a, b], ViewMode::Admin, &ws);
        assert!(view.fullscreen_item().is_none());

        assert!(view.set_fullscreen(a_id));
        assert_eq!(view.fullscreen_item().unwrap().id(), a_id);

        // Selecting another item replaces the current one.
        assert!(view.set_fullscreen(b_id));
        assert_eq!(view.fullscreen_item().unwrap().id(), b_id);

        assert!(!view.set_fullscreen(Uuid::new_v4()));
        assert_eq!(view.fullscreen_item().unwrap().id(), b_id);

        view.clear_fullscreen();
        assert!(view.fullscreen_item().is_none());
    }

    #[test]
    fn fullscreen_plan_is_derived_fresh() {
        let (_dir, ws) = workshop();
        let rec = record(MediaKind::DocumentPdf, "data:application/pdf;base64,JVBERi0=");
        let rec_id = rec.id;

        let mut view = GalleryView::build(vec![rec], ViewMode::Admin, &ws);
        view.set_fullscreen(rec_id);

        let list_uri = match &view.items()[0].content {
            ItemContent::Plan(plan) => plan.target_uri().to_string(),
            _ => panic!("expected a plan"),
        };
        let full = view.fullscreen_plan(&ws).unwrap();
        let ItemContent::Plan(full_plan) = full else {
            panic!("expected a plan");
        };
        // Independent handles: the fullscreen preview is a new file.
        assert_ne!(full_plan.target_uri(), list_uri);
    }
}
