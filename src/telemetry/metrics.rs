use once_cell::sync::Lazy;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};

pub static METER: Lazy<Meter> = Lazy::new(|| global::meter("course-marketplace"));

pub static HTTP_REQUESTS_TOTAL: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("http.server.requests")
        .with_description("Total HTTP requests served")
        .build()
});

pub static HTTP_REQUEST_DURATION: Lazy<Histogram<f64>> = Lazy::new(|| {
    METER
        .f64_histogram("http.server.duration")
        .with_description("HTTP request latency")
        .with_unit("ms")
        .build()
});

pub static FAVORITES_ADDED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.added")
        .with_description("Total favorite marks created")
        .build()
});

pub static FAVORITES_REMOVED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.removed")
        .with_description("Total favorite marks removed")
        .build()
});

pub static COMMENTS_ADDED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("comments.added")
        .with_description("Total course comments posted")
        .build()
});

pub static ENROLLMENTS_CREATED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("enrollments.created")
        .with_description("Total first-time course enrollments")
        .build()
});

pub static USERS_REGISTERED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("users.registered")
        .with_description("Total users registered")
        .build()
});

pub static USER_ASKS_ADDED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("user_asks.added")
        .with_description("Total consultation requests left on organization pages")
        .build()
});
