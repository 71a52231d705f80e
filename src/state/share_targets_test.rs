use super::*;
use crate::net::types::ChatMember;

// =============================================================
// Helpers
// =============================================================

const ME: UserId = 1;

fn user(id: UserId, username: &str) -> ChatUser {
    ChatUser { id, username: Some(username.to_owned()), is_moderator: false, image: None }
}

fn member(id: UserId, username: &str, status: ChatMemberStatus) -> ChatMember {
    ChatMember { user_id: id, status, is_owner: false, user: user(id, username) }
}

fn me(status: ChatMemberStatus) -> ChatMember {
    member(ME, "me", status)
}

fn msg(content: &str, created_at: i64) -> MessagePreview {
    MessagePreview { content: content.to_owned(), content_type: "Markdown".to_owned(), created_at }
}

fn chat(id: i64, created_at: i64, members: Vec<ChatMember>, messages: Vec<MessagePreview>) -> ChatListItem {
    ChatListItem { id, created_at, chat_members: members, messages }
}

fn ids(chats: &[ChatListItem]) -> Vec<i64> {
    chats.iter().map(|c| c.id).collect()
}

// =============================================================
// Membership filter
// =============================================================

#[test]
fn only_joined_chats_are_visible() {
    let chats = vec![
        chat(1, 0, vec![me(ChatMemberStatus::Joined), member(2, "A", ChatMemberStatus::Joined)], vec![]),
        chat(2, 0, vec![me(ChatMemberStatus::Invited), member(3, "B", ChatMemberStatus::Joined)], vec![]),
        chat(3, 0, vec![me(ChatMemberStatus::Left)], vec![]),
        chat(4, 0, vec![member(5, "C", ChatMemberStatus::Joined)], vec![]),
    ];
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "")), vec![1]);
}

#[test]
fn no_current_user_sees_nothing() {
    let chats = vec![chat(1, 0, vec![me(ChatMemberStatus::Joined)], vec![])];
    assert!(visible_share_targets(&chats, None, "").is_empty());
}

// =============================================================
// Search filter
// =============================================================

#[test]
fn search_matches_other_members_case_insensitively() {
    let chats = vec![
        chat(1, 0, vec![me(ChatMemberStatus::Joined), member(2, "Anna", ChatMemberStatus::Joined)], vec![]),
        chat(2, 0, vec![me(ChatMemberStatus::Joined), member(3, "Bob", ChatMemberStatus::Joined)], vec![]),
    ];
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "ann")), vec![1]);
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "ANN")), vec![1]);
}

#[test]
fn search_ignores_own_username() {
    let chats = vec![chat(
        1,
        0,
        vec![member(ME, "annie", ChatMemberStatus::Joined), member(2, "Bob", ChatMemberStatus::Joined)],
        vec![],
    )];
    assert!(visible_share_targets(&chats, Some(ME), "ann").is_empty());
}

#[test]
fn search_skips_members_without_username() {
    let mut nameless = member(2, "", ChatMemberStatus::Joined);
    nameless.user.username = None;
    let chats = vec![chat(1, 0, vec![me(ChatMemberStatus::Joined), nameless], vec![])];
    assert!(visible_share_targets(&chats, Some(ME), "a").is_empty());
    assert_eq!(visible_share_targets(&chats, Some(ME), "").len(), 1);
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn chat_with_recent_message_precedes_older_empty_chat() {
    let chats = vec![
        chat(1, 100, vec![me(ChatMemberStatus::Joined), member(2, "A", ChatMemberStatus::Joined)], vec![]),
        chat(
            2,
            50,
            vec![me(ChatMemberStatus::Joined), member(3, "B", ChatMemberStatus::Joined)],
            vec![msg("hi", 200)],
        ),
    ];
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "")), vec![2, 1]);
}

#[test]
fn empty_chat_uses_creation_time() {
    let chats = vec![
        chat(1, 300, vec![me(ChatMemberStatus::Joined)], vec![]),
        chat(2, 50, vec![me(ChatMemberStatus::Joined)], vec![msg("hi", 200)]),
    ];
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "")), vec![1, 2]);
}

#[test]
fn equal_activity_breaks_ties_by_id_descending() {
    let chats = vec![
        chat(3, 10, vec![me(ChatMemberStatus::Joined)], vec![]),
        chat(7, 10, vec![me(ChatMemberStatus::Joined)], vec![]),
        chat(5, 10, vec![me(ChatMemberStatus::Joined)], vec![]),
    ];
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "")), vec![7, 5, 3]);
}

#[test]
fn latest_message_uses_newest_even_if_out_of_order() {
    let c = chat(1, 0, vec![], vec![msg("old", 10), msg("new", 30), msg("mid", 20)]);
    assert_eq!(latest_message(&c).map(|m| m.content.as_str()), Some("new"));
    assert_eq!(last_activity(&c), 30);
}

// =============================================================
// End-to-end
// =============================================================

#[test]
fn latest_message_tie_keeps_first_entry() {
    let c = chat(1, 0, vec![me(ChatMemberStatus::Joined)], vec![msg("newest", 5), msg("older", 5)]);
    assert_eq!(latest_message(&c).map(|m| m.content.as_str()), Some("newest"));
    assert_eq!(last_activity(&c), 5);
}

#[test]
fn scenario_empty_search_orders_by_message_then_creation() {
    let chats = vec![
        chat(1, 1_000, vec![me(ChatMemberStatus::Joined), member(2, "A", ChatMemberStatus::Joined)], vec![]),
        chat(
            2,
            500,
            vec![me(ChatMemberStatus::Joined), member(3, "B", ChatMemberStatus::Joined)],
            vec![msg("hi", 2_000)],
        ),
    ];
    assert_eq!(ids(&visible_share_targets(&chats, Some(ME), "")), vec![2, 1]);
}

// =============================================================
// Row presentation
// =============================================================

#[test]
fn row_avatar_depends_on_other_member_count() {
    let solo = chat(1, 0, vec![me(ChatMemberStatus::Joined)], vec![]);
    let pair = chat(2, 0, vec![me(ChatMemberStatus::Joined), member(2, "A", ChatMemberStatus::Joined)], vec![]);
    let group = chat(
        3,
        0,
        vec![
            me(ChatMemberStatus::Joined),
            member(2, "A", ChatMemberStatus::Joined),
            member(3, "B", ChatMemberStatus::Joined),
        ],
        vec![],
    );
    assert_eq!(ShareRow::from_chat(&solo, Some(ME)).avatar, RowAvatar::Nobody);
    assert_eq!(ShareRow::from_chat(&pair, Some(ME)).avatar, RowAvatar::User(user(2, "A")));
    assert_eq!(ShareRow::from_chat(&group, Some(ME)).avatar, RowAvatar::Group);
    assert_eq!(ShareRow::from_chat(&group, Some(ME)).names, "A, B");
}

#[test]
fn row_preview_requires_joined_and_content() {
    let joined = chat(1, 0, vec![me(ChatMemberStatus::Joined)], vec![msg("hello", 5)]);
    let invited = chat(2, 0, vec![me(ChatMemberStatus::Invited)], vec![msg("hello", 5)]);
    let blank = chat(3, 0, vec![me(ChatMemberStatus::Joined)], vec![msg("", 5)]);
    assert_eq!(ShareRow::from_chat(&joined, Some(ME)).preview.as_deref(), Some("hello"));
    assert_eq!(ShareRow::from_chat(&invited, Some(ME)).preview, None);
    assert_eq!(ShareRow::from_chat(&blank, Some(ME)).preview, None);
}

#[test]
fn row_moderator_badge_requires_owner_moderator() {
    let mut moderator = member(2, "Mod", ChatMemberStatus::Joined);
    moderator.user.is_moderator = true;
    let plain = chat(1, 0, vec![me(ChatMemberStatus::Joined), moderator.clone()], vec![]);
    let row = ShareRow::from_chat(&plain, Some(ME));
    assert!(row.has_moderator);
    assert!(!row.is_moderator_chat);

    moderator.is_owner = true;
    let owned = chat(2, 0, vec![me(ChatMemberStatus::Joined), moderator], vec![]);
    assert!(ShareRow::from_chat(&owned, Some(ME)).is_moderator_chat);
}

#[test]
fn own_moderator_ownership_does_not_count() {
    let mut mine = me(ChatMemberStatus::Joined);
    mine.is_owner = true;
    mine.user.is_moderator = true;
    let c = chat(1, 0, vec![mine, member(2, "A", ChatMemberStatus::Joined)], vec![]);
    let row = ShareRow::from_chat(&c, Some(ME));
    assert!(!row.is_moderator_chat);
    assert!(!row.has_moderator);
}
