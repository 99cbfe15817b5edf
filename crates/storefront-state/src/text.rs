//! Localized UI Strings
//!
//! User-facing texts shared by the widgets. Fallbacks are used whenever the
//! backend does not supply a `detail`.

// Generic
pub const NETWORK_FAILURE: &str = "Не удалось подключиться к серверу. Проверьте соединение.";
pub const LOGIN_REQUIRED: &str = "Необходимо авторизоваться";
pub const SESSION_EXPIRED: &str = "Сессия истекла. Войдите снова.";
pub const GO_TO_LOGIN: &str = "Перейти на страницу входа?";
pub const LOADING: &str = "Загрузка...";

// Cart
pub const CART_ADD_FAILED: &str = "Ошибка при добавлении в корзину";
pub const CART_UPDATE_FAILED: &str = "Ошибка при обновлении корзины";
pub const CART_REMOVE_FAILED: &str = "Не удалось удалить товар из корзины";
pub const CART_CLEAR_FAILED: &str = "Не удалось очистить корзину";
pub const CART_CLEAR_CONFIRM: &str = "Вы уверены, что хотите очистить всю корзину?";
pub const CART_LINE_REMOVED: &str = "Товар удалён из корзины";
pub const CART_ADDED: &str = "Товар добавлен в корзину";
pub const CART_EMPTY: &str = "Корзина пуста";
pub const CHECKOUT_LOGIN_REQUIRED: &str = "Для оформления заказа необходимо авторизоваться";

// Catalog
pub const LOAD_MORE_FAILED: &str = "Ошибка загрузки товаров";
pub const NO_MORE_PRODUCTS: &str = "Нет дополнительных товаров";
pub const PRICE_MISSING: &str = "Цена не указана";
pub const FAVORITES_LOGIN_REQUIRED: &str = "Для добавления товаров в избранное необходимо войти в систему";
pub const FAVORITE_FAILED: &str = "Не удалось обновить избранное";
pub const DEFAULT_PRODUCT_IMAGE: &str = "/static/images/default_image.png";

// Chat
pub const CHAT_DEFAULT_TOPIC: &str = "Общая поддержка";
pub const CHAT_NO_MESSAGES: &str = "Нет сообщений. Начните диалог!";
pub const CHAT_ENDED: &str = "Чат завершён. Начните новый.";
pub const CHAT_END_SUCCESS: &str = "Чат успешно завершён.";
pub const CHAT_END_FAILED: &str = "Не удалось завершить чат";
pub const CHAT_END_CONFIRM: &str = "Вы уверены, что хотите завершить чат?";
pub const CHAT_INIT_FAILED: &str = "Ошибка инициализации чата";
pub const CHAT_LOAD_FAILED: &str = "Ошибка загрузки";
pub const CHAT_SEND_FAILED: &str = "Ошибка отправки";
pub const CHAT_CREATE_FAILED: &str = "Ошибка создания чата";
pub const CHAT_SUPPORT_NAME: &str = "Поддержка";
pub const CHAT_OPERATOR_PREFIX: &str = "Оператор";

// Orders
pub const ORDER_CREATE_FAILED: &str = "Не удалось оформить заказ";
pub const ORDER_CANCEL_CONFIRM: &str = "Вы уверены, что хотите отменить заказ?";
pub const ORDER_CANCEL_SUCCESS: &str = "Заказ успешно отменён.";
pub const ORDER_CANCEL_FAILED: &str = "Не удалось отменить заказ";
pub const ORDERS_LOAD_FAILED: &str = "Произошла ошибка при загрузке заказов";
pub const ORDER_STATUS_UPDATED: &str = "Статус успешно обновлён";
pub const ORDER_STATUS_FAILED: &str = "Ошибка при обновлении статуса";
pub const ORDER_NO_PRODUCTS: &str = "В заказе нет товаров";

// Reviews
pub const REVIEW_SUCCESS: &str = "Отзыв успешно добавлен!";
pub const REVIEW_FAILED: &str = "Ошибка при отправке отзыва";
pub const REVIEWS_SHOW_ALL: &str = "Показать все отзывы";
pub const REVIEWS_HIDE: &str = "Скрыть отзывы";

// Auth / profile
pub const LOGIN_FAILED: &str = "Ошибка входа";
pub const REGISTER_FAILED: &str = "Ошибка регистрации";
pub const PASSWORD_CHANGED: &str = "Пароль успешно изменен";
pub const PASSWORD_CHANGE_FAILED: &str = "Ошибка изменения пароля";
pub const PROFILE_UPDATED: &str = "Профиль обновлен!";
pub const PROFILE_UPDATE_FAILED: &str = "Произошла ошибка при обновлении профиля.";
pub const ACCOUNT_DELETE_CONFIRM: &str = "Вы уверены, что хотите удалить аккаунт? Это действие нельзя отменить.";
pub const ACCOUNT_DELETE_FAILED: &str = "Ошибка при удалении аккаунта";
pub const SAVING: &str = "Сохранение...";
