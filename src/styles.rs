//! Stylesheet for notifications, injected at startup so the page markup
//! does not need to know about them.

pub const NOTIFICATION_CSS: &str = r#"
.notification {
    position: fixed;
    top: 70px;
    right: -400px;
    background: white;
    border: 2px solid var(--color-border, #D1D9E6);
    border-radius: 12px;
    padding: 12px 20px;
    box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
    display: flex;
    align-items: center;
    gap: 10px;
    font-weight: 600;
    font-size: 0.95rem;
    z-index: 10001;
    transition: right 0.3s ease;
    max-width: 320px;
}
.notification.show { right: 16px; }
.notification-success { background: #9DB6A5; color: white; border-color: #8AA595; }
.notification-error { background: #E07A5F; color: white; border-color: #D4674F; }
.notification-info { background: #7C9CBF; color: white; border-color: #6A8BAF; }
.notification-emoji { font-size: 1.2rem; flex-shrink: 0; }
.notification-text { flex: 1; }
body.dark-mode .notification { border-color: #4B5563; }
body.dark-mode .notification-success { background: #8AA595; }
body.dark-mode .notification-error { background: #D4674F; }
body.dark-mode .notification-info { background: #6A8BAF; }
@media (max-width: 768px) {
    .notification { font-size: 0.85rem; padding: 10px 16px; max-width: 280px; top: 60px; }
    .notification.show { right: 12px; }
    .notification-emoji { font-size: 1.1rem; }
}
"#;
