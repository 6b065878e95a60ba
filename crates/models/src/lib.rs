// Core modules
pub mod blog;
pub mod message;
pub mod offer;
pub mod session;

// Re-export commonly used types
pub use blog::{BlogPost, BlogPostDto, NewBlogPost};
pub use message::{
    ArchiveAction, ArchivedMessage, ContactForm, Message, NewArchivedMessage, NewMessage,
    PaginatedArchivedMessages, PaginatedMessages,
};
pub use offer::{ImageUpdate, NewOffer, Offer, OfferDto};
pub use session::{AdminSession, NewAdminSession};
