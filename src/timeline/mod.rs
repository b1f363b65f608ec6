//! The timeline layout and label-translation engine.

pub mod calendar;
pub mod controller;
pub mod gesture;
pub mod labels;
pub mod lanes;
pub mod reconcile;
pub mod view;

pub use controller::{RefreshTimer, TimelineCallbacks, TimelineController};
pub use gesture::{DateRange, GestureTranslator, MoveGesture, MovedItem};
pub use labels::{AxisContext, LabelRewriter, RewriteStats, TextTickResolver, TickDateResolver};
pub use lanes::LaneAllocator;
pub use reconcile::{DatasetReconciler, ReconcilePlan, ReconcileStats};
pub use view::{
    DataSet, Dataset, EventKind, LabelStyle, LaneRow, ListenerId, ListenerRegistry, TickLabel,
    TimelineView, ViewEvent, ViewOptions, VisualItem,
};
