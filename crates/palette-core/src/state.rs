//! `AppState`: the one immutable record the core loop replaces on every
//! transition, plus the per-view sub-states it carries.

use crate::date::DateParts;
use crate::schema::{FormField, ObjectSchema, ToolDef};
use crate::values::{self, FormValues};
use indexmap::IndexSet;
use serde_json::Value;
use std::collections::BTreeSet;

/// Sentinel index appended to `filtered_indices` for the Execute/Add/Save row.
pub const ACTION_ROW: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Commands,
    Form,
    Loading,
    Results,
}

/// Command-palette state.
#[derive(Debug, Clone)]
pub struct CommandsState {
    pub query: String,
    pub query_cursor: usize,
    /// Indices into `AppState::tools`, filtered by `query`.
    pub filtered: Vec<usize>,
    pub cursor: usize,
    pub scroll_top: usize,
    pub quit_confirm: bool,
}

impl CommandsState {
    pub fn new(tool_count: usize) -> Self {
        Self {
            query: String::new(),
            query_cursor: 0,
            filtered: (0..tool_count).collect(),
            cursor: 0,
            scroll_top: 0,
            quit_confirm: false,
        }
    }
}

/// Why the current form exists — governs the Execute/Add/Save label and
/// what popping the form stack (or finishing the form) does.
#[derive(Debug, Clone)]
pub enum FormOrigin {
    /// Top-level invocation of a catalog tool.
    ToolInvocation,
    /// A sub-form appending a new item to a parent `arrayObj` field.
    AppendingItem,
    /// A sub-form editing an existing item of a parent `arrayObj` field.
    EditingItem,
}

/// A frozen parent form, pushed while the user descends into one of its
/// `arrayObj` fields.
#[derive(Debug, Clone)]
pub struct FormStackEntry {
    /// The frozen form's own label, restored into `FormState::tool_name`
    /// when this entry is popped.
    pub tool_name: String,
    pub fields: Vec<FormField>,
    pub values: FormValues,
    pub origin: FormOrigin,
    /// The parent field whose array is being edited.
    pub array_field_name: String,
    /// `None` when appending; `Some(i)` when replacing item `i`.
    pub edit_index: Option<usize>,
}

/// Which tag is under the cursor in an `arrayText` editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCursor {
    Item(usize),
    Input,
}

/// The field-kind-specific editor state.
#[derive(Debug, Clone)]
pub enum FieldEditor {
    /// `text` / `number`.
    Text { buf: String, cursor: usize },
    /// `bool` / `enum`: a single choice from a fixed list.
    Choice { options: Vec<String>, cursor: usize },
    /// `arrayEnum`: a set of toggled choices, live-committed to the draft.
    MultiChoice {
        options: Vec<String>,
        cursor: usize,
        selected: BTreeSet<usize>,
    },
    /// `arrayText`: an ordered tag list plus a trailing text input.
    TagList {
        items: Vec<String>,
        cursor: TagCursor,
        input: String,
        input_cursor: usize,
    },
    /// `date` / `date-time`.
    Date { parts: DateParts },
    /// `arrayObj`: a list of existing items plus an "Add new item" row.
    ArrayObjList { cursor: usize },
}

/// Form-view state: palette navigation plus, when `editing.is_some()`,
/// the active field editor.
#[derive(Debug, Clone)]
pub struct FormState {
    pub tool_name: String,
    pub fields: Vec<FormField>,
    pub values: FormValues,
    pub stack: Vec<FormStackEntry>,
    pub origin: FormOrigin,
    pub search_query: String,
    pub search_cursor: usize,
    /// Indices into `fields`, filtered by `search_query`, with
    /// [`ACTION_ROW`] appended as the Execute/Add/Save sentinel.
    pub filtered_indices: Vec<i64>,
    pub list_cursor: usize,
    pub scroll_top: usize,
    pub show_required: bool,
    pub show_optional: bool,
    pub editing: Option<(usize, FieldEditor)>,
}

impl FormState {
    pub fn new(tool: &ToolDef) -> Self {
        let fields = tool.resolve_fields();
        Self::from_fields(tool.name.clone(), fields, FormOrigin::ToolInvocation)
    }

    /// A sub-form for one element of an `arrayObj` field, prepopulated
    /// from `initial` when editing an existing item (`edit_index`) or
    /// blank when appending.
    pub fn new_subform(
        schema: &ObjectSchema,
        label: String,
        origin: FormOrigin,
        initial: Option<&serde_json::Map<String, Value>>,
    ) -> Self {
        let fields = schema.fields();
        let mut state = Self::from_fields(label, fields, origin);
        if let Some(initial) = initial {
            for field in &state.fields {
                if let Some(v) = initial.get(&field.name) {
                    state
                        .values
                        .insert(field.name.clone(), crate::args_reverse::value_to_draft(&field.property.kind, v));
                }
            }
        }
        state
    }

    fn from_fields(tool_name: String, fields: Vec<FormField>, origin: FormOrigin) -> Self {
        let values = values::init_values(&fields);
        let filtered_indices = Self::all_indices(&fields);
        Self {
            tool_name,
            fields,
            values,
            stack: Vec::new(),
            origin,
            search_query: String::new(),
            search_cursor: 0,
            filtered_indices,
            list_cursor: 0,
            scroll_top: 0,
            show_required: false,
            show_optional: false,
            editing: None,
        }
    }

    fn all_indices(fields: &[FormField]) -> Vec<i64> {
        let mut indices: Vec<i64> = (0..fields.len() as i64).collect();
        indices.push(ACTION_ROW);
        indices
    }

    /// Rebuild a parent form from a popped `FormStackEntry`, reattaching
    /// whatever ancestors remain deeper in `remaining_stack`. Navigation
    /// state (search, scroll, cursor) restarts fresh rather than being
    /// preserved across the descent.
    pub fn from_stack_entry(entry: FormStackEntry, remaining_stack: Vec<FormStackEntry>) -> Self {
        let filtered_indices = Self::all_indices(&entry.fields);
        Self {
            tool_name: entry.tool_name,
            fields: entry.fields,
            values: entry.values,
            stack: remaining_stack,
            origin: entry.origin,
            search_query: String::new(),
            search_cursor: 0,
            filtered_indices,
            list_cursor: 0,
            scroll_top: 0,
            show_required: false,
            show_optional: false,
            editing: None,
        }
    }

    /// Recompute `filtered_indices` from `search_query`, clamping
    /// `list_cursor` into range. Optional fields are included only when
    /// `show_optional` is set or a search query narrows the list.
    pub fn refilter(&mut self) {
        let query = self.search_query.trim().to_lowercase();
        let mut indices: Vec<i64> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| {
                if !query.is_empty() {
                    return f.name.to_lowercase().contains(&query);
                }
                f.required || self.show_optional
            })
            .map(|(i, _)| i as i64)
            .collect();
        indices.push(ACTION_ROW);
        self.filtered_indices = indices;
        if self.list_cursor >= self.filtered_indices.len() {
            self.list_cursor = self.filtered_indices.len() - 1;
        }
    }

    pub fn required_progress(&self) -> (usize, usize) {
        values::required_progress(&self.fields, &self.values)
    }

    pub fn is_complete(&self) -> bool {
        let (filled, total) = self.required_progress();
        filled == total
    }

    /// Index of the first required field that is still unset, in
    /// declaration order.
    pub fn first_unfilled_required(&self) -> Option<usize> {
        self.fields.iter().enumerate().find_map(|(i, f)| {
            if !f.required {
                return None;
            }
            let draft = self.values.get(&f.name)?;
            values::is_unset(&f.property.kind, draft).then_some(i)
        })
    }
}

/// Loading-view state: just a monotonic spinner counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingState {
    pub spinner_frame: usize,
    pub message_index: usize,
}

/// Sentinel distinguishing "tool returned an empty collection" from
/// "tool returned nothing at all" in the results view.
pub const EMPTY_LIST_SENTINEL: &str = "\0__palette_empty_list__\0";

/// Results-view state.
#[derive(Debug, Clone)]
pub struct ResultsState {
    pub result: Option<Value>,
    pub error: Option<String>,
    pub scroll: usize,
    pub scroll_x: usize,
    /// Where escape/enter return to: the form (if the tool had
    /// parameters and the result was non-empty) or the command list.
    pub return_to_form: bool,
    pub quit_confirm: bool,
}

/// The single, completely-replaced application record.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub tools: Vec<ToolDef>,
    pub commands: CommandsState,
    pub form: Option<FormState>,
    pub loading: Option<LoadingState>,
    pub results: Option<ResultsState>,
    pub should_exit: bool,
}

impl AppState {
    pub fn new(tools: Vec<ToolDef>) -> Self {
        let commands = CommandsState::new(tools.len());
        Self {
            view: View::Commands,
            tools,
            commands,
            form: None,
            loading: None,
            results: None,
            should_exit: false,
        }
    }

    pub fn find_tool(&self, name: &str) -> Option<&ToolDef> {
        self.tools.iter().find(|t| t.name == name)
    }
}

/// Groups tools by a fixed set of well-known name prefixes for the
/// Commands view's section headers.
pub fn group_label(tool_name: &str) -> &'static str {
    if tool_name.starts_with("reader_") {
        "Reader"
    } else if tool_name.starts_with("readwise_") {
        "Readwise"
    } else {
        "Other"
    }
}
