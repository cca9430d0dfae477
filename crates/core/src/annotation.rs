//! Text-box annotations and their store.
//!
//! Annotations are positioned, editable text boxes tied to one page.
//! Identity is permanent once created; ids are a monotonic counter and never
//! collide within a session. Insertion order is the z-order, later wins.

/// Unique identifier for a text annotation, assigned in creation order.
pub type AnnotationId = u64;

/// Default geometry for a freshly created annotation.
const DEFAULT_X: f32 = 150.0;
const DEFAULT_Y: f32 = 150.0;
const DEFAULT_WIDTH: f32 = 100.0;
const DEFAULT_HEIGHT: f32 = 50.0;

/// Drag keeps the pointer at this offset inside the box.
const DRAG_OFFSET_X: f32 = 75.0;
const DRAG_OFFSET_Y: f32 = 25.0;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextAnnotation {
    id: AnnotationId,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    text: String,
    has_text: bool,
    page_number: u32,
}

impl TextAnnotation {
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// False until a non-empty edit is committed. Annotations without text
    /// are excluded from export.
    pub fn has_text(&self) -> bool {
        self.has_text
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }
}

/// Owns every annotation of the session.
///
/// Focus and drag target are transient view state, not annotation data.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    next_id: AnnotationId,
    annotations: Vec<TextAnnotation>,
    focused: Option<AnnotationId>,
    dragging: Option<AnnotationId>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotation on `page_number` at the default position, with
    /// empty text. Returns its permanent id.
    pub fn create(&mut self, page_number: u32) -> AnnotationId {
        self.next_id += 1;
        let id = self.next_id;

        self.annotations.push(TextAnnotation {
            id,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            text: String::new(),
            has_text: false,
            page_number,
        });

        id
    }

    /// Move an annotation. Unknown ids are ignored; identity and text are
    /// preserved.
    pub fn reposition(&mut self, id: AnnotationId, x: f32, y: f32) {
        let Some(annotation) = self.annotations.iter_mut().find(|a| a.id == id) else {
            log::debug!("reposition for unknown annotation {id}, ignoring");
            return;
        };

        annotation.x = x;
        annotation.y = y;
    }

    /// Commit an edit session's text. Whitespace-only text counts as empty
    /// and leaves the annotation excluded from export.
    pub fn commit_text(&mut self, id: AnnotationId, text: &str) {
        let Some(annotation) = self.annotations.iter_mut().find(|a| a.id == id) else {
            log::debug!("text commit for unknown annotation {id}, ignoring");
            return;
        };

        let trimmed = text.trim();
        annotation.text = trimmed.to_owned();
        annotation.has_text = !trimmed.is_empty();
    }

    /// Annotations of one page in creation order, for rendering and export.
    pub fn for_page(&self, page_number: u32) -> Vec<&TextAnnotation> {
        self.annotations.iter().filter(|a| a.page_number == page_number).collect()
    }

    pub fn get(&self, id: AnnotationId) -> Option<&TextAnnotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Remove an annotation entirely. Emptied shells otherwise persist
    /// invisibly; this is the explicit way to drop them.
    pub fn remove(&mut self, id: AnnotationId) -> Option<TextAnnotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.dragging == Some(id) {
            self.dragging = None;
        }
        Some(self.annotations.remove(index))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Give one annotation the edit/drag focus. At most one is focused.
    pub fn set_focus(&mut self, id: AnnotationId) {
        if self.annotations.iter().any(|a| a.id == id) {
            self.focused = Some(id);
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<AnnotationId> {
        self.focused
    }

    /// Start drag-repositioning an annotation.
    pub fn begin_drag(&mut self, id: AnnotationId) {
        if self.annotations.iter().any(|a| a.id == id) {
            self.dragging = Some(id);
        } else {
            log::debug!("drag begin for unknown annotation {id}, ignoring");
        }
    }

    /// Follow the pointer during a drag, keeping the box under the cursor.
    pub fn drag_to(&mut self, pointer_x: f32, pointer_y: f32) {
        let Some(id) = self.dragging else {
            return;
        };
        self.reposition(id, pointer_x - DRAG_OFFSET_X, pointer_y - DRAG_OFFSET_Y);
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<AnnotationId> {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_distinct_ids_in_creation_order() {
        let mut store = AnnotationStore::new();

        let ids: Vec<AnnotationId> = (0..5).map(|_| store.create(1)).collect();

        let mut unique = ids.clone();
        unique.dedup();
        assert_eq!(unique.len(), 5);

        let page: Vec<AnnotationId> = store.for_page(1).iter().map(|a| a.id()).collect();
        assert_eq!(page, ids);
    }

    #[test]
    fn created_annotation_has_default_geometry_and_no_text() {
        let mut store = AnnotationStore::new();
        let id = store.create(3);

        let annotation = store.get(id).expect("annotation should exist");
        assert_eq!(annotation.x(), 150.0);
        assert_eq!(annotation.y(), 150.0);
        assert_eq!(annotation.width(), 100.0);
        assert_eq!(annotation.height(), 50.0);
        assert_eq!(annotation.text(), "");
        assert!(!annotation.has_text());
        assert_eq!(annotation.page_number(), 3);
    }

    #[test]
    fn reposition_moves_only_position() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);
        store.commit_text(id, "note");

        store.reposition(id, 40.0, 60.0);

        let annotation = store.get(id).expect("annotation should exist");
        assert_eq!((annotation.x(), annotation.y()), (40.0, 60.0));
        assert_eq!(annotation.text(), "note");
        assert_eq!(annotation.id(), id);
    }

    #[test]
    fn reposition_unknown_id_leaves_store_unchanged() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);
        let before = store.get(id).expect("annotation should exist").clone();

        store.reposition(id + 100, 0.0, 0.0);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id), Some(&before));
    }

    #[test]
    fn whitespace_only_commit_counts_as_empty() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);

        store.commit_text(id, "   ");

        let annotation = store.get(id).expect("annotation should exist");
        assert!(!annotation.has_text());
        assert_eq!(annotation.text(), "");
    }

    #[test]
    fn commit_trims_and_sets_has_text() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);

        store.commit_text(id, "  redacted by legal  ");

        let annotation = store.get(id).expect("annotation should exist");
        assert!(annotation.has_text());
        assert_eq!(annotation.text(), "redacted by legal");

        // Re-committing empty text empties the shell again.
        store.commit_text(id, "");
        assert!(!store.get(id).expect("annotation should exist").has_text());
    }

    #[test]
    fn for_page_filters_by_page() {
        let mut store = AnnotationStore::new();
        let a = store.create(1);
        let _b = store.create(2);
        let c = store.create(1);

        let page: Vec<AnnotationId> = store.for_page(1).iter().map(|x| x.id()).collect();
        assert_eq!(page, vec![a, c]);
        assert_eq!(store.for_page(9).len(), 0);
    }

    #[test]
    fn drag_centers_box_under_pointer() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);

        store.begin_drag(id);
        store.drag_to(200.0, 100.0);
        store.end_drag();

        let annotation = store.get(id).expect("annotation should exist");
        assert_eq!((annotation.x(), annotation.y()), (125.0, 75.0));

        // No drag in progress: pointer motion does nothing.
        store.drag_to(0.0, 0.0);
        assert_eq!(store.get(id).expect("annotation should exist").x(), 125.0);
    }

    #[test]
    fn focus_is_exclusive_and_cleared_on_remove() {
        let mut store = AnnotationStore::new();
        let a = store.create(1);
        let b = store.create(1);

        store.set_focus(a);
        store.set_focus(b);
        assert_eq!(store.focused(), Some(b));

        store.remove(b);
        assert_eq!(store.focused(), None);
        assert_eq!(store.len(), 1);
        assert!(store.get(a).is_some());
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut store = AnnotationStore::new();
        let a = store.create(1);
        store.remove(a);

        let b = store.create(1);
        assert_ne!(a, b);
    }
}
