//! Static copy for the session flow and the conversation toolbox.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReframeTheme {
    Mindset,
    Comfort,
    Quality,
    Growth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentalReframe {
    pub id: &'static str,
    pub text: &'static str,
    pub theme: ReframeTheme,
}

pub static MENTAL_REFRAMES: [MentalReframe; 6] = [
    MentalReframe {
        id: "reframe-1",
        text: "Networking isn't selling yourself — it's being curious about others.",
        theme: ReframeTheme::Mindset,
    },
    MentalReframe {
        id: "reframe-2",
        text: "You don't need to impress anyone. A genuine question is more memorable than a polished pitch.",
        theme: ReframeTheme::Mindset,
    },
    MentalReframe {
        id: "reframe-3",
        text: "Most people at events feel just as awkward as you do. You're not alone in this.",
        theme: ReframeTheme::Comfort,
    },
    MentalReframe {
        id: "reframe-4",
        text: "One meaningful conversation is better than handing out 20 business cards.",
        theme: ReframeTheme::Quality,
    },
    MentalReframe {
        id: "reframe-5",
        text: "Think of it as practice, not performance. Every interaction makes you better.",
        theme: ReframeTheme::Growth,
    },
    MentalReframe {
        id: "reframe-6",
        text: "People want to help — most are flattered when you ask for advice or insight.",
        theme: ReframeTheme::Comfort,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfidencePrep {
    pub id: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub static CONFIDENCE_PREP: [ConfidencePrep; 4] = [
    ConfidencePrep {
        id: "confidence-1",
        title: "Take a Breath",
        text: "Before you walk in, pause. Take three slow breaths. You've prepared, you're ready, and you belong here.",
    },
    ConfidencePrep {
        id: "confidence-2",
        title: "Power Pose",
        text: "Stand tall for 30 seconds before entering. Open posture signals confidence — even to yourself.",
    },
    ConfidencePrep {
        id: "confidence-3",
        title: "Your Anchor",
        text: "Remind yourself of one thing you're genuinely proud of. That's the energy you want to bring in.",
    },
    ConfidencePrep {
        id: "confidence-4",
        title: "Set a Tiny Goal",
        text: "Don't aim for perfection. Aim for one real conversation. Just one. That's your win.",
    },
];

pub static GOAL_SUGGESTIONS: [&str; 8] = [
    "Meet 1 new person in my field",
    "Learn about someone's career path",
    "Practice my self-introduction",
    "Ask someone for advice on a challenge",
    "Find a potential mentor",
    "Learn about a new company or role",
    "Reconnect with someone I've met before",
    "Step outside my comfort zone",
];

pub static ACTION_COMMITMENTS: [&str; 7] = [
    "I will introduce myself to at least one new person",
    "I will ask at least one open-ended question",
    "I will listen more than I talk",
    "I will remember and use people's names",
    "I will share something genuine about myself",
    "I will stay for at least 30 minutes",
    "I will follow up with someone within 48 hours",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationStarter {
    pub id: &'static str,
    pub text: &'static str,
    pub context: &'static str,
}

pub static GENERAL_STARTERS: [ConversationStarter; 5] = [
    ConversationStarter {
        id: "cs-1",
        text: "What brought you to this event?",
        context: "Great universal opener",
    },
    ConversationStarter {
        id: "cs-2",
        text: "What are you working on at the moment?",
        context: "Shows genuine interest",
    },
    ConversationStarter {
        id: "cs-3",
        text: "How did you get into your field?",
        context: "People love sharing their story",
    },
    ConversationStarter {
        id: "cs-4",
        text: "What's the most interesting thing you've learned recently?",
        context: "Sparks deeper conversation",
    },
    ConversationStarter {
        id: "cs-5",
        text: "Is this your first time at this type of event?",
        context: "Low-pressure opener",
    },
];

pub static CURIOSITY_PROMPTS: [ConversationStarter; 4] = [
    ConversationStarter {
        id: "cur-1",
        text: "What does a typical day look like in your role?",
        context: "Learn about their work",
    },
    ConversationStarter {
        id: "cur-2",
        text: "What advice would you give someone starting out in your field?",
        context: "Great for mentorship",
    },
    ConversationStarter {
        id: "cur-3",
        text: "What's changing in your industry right now?",
        context: "Shows you want to learn",
    },
    ConversationStarter {
        id: "cur-4",
        text: "What do you wish you'd known earlier in your career?",
        context: "Invites reflection",
    },
];

pub static FOLLOW_UP_QUESTIONS: [ConversationStarter; 5] = [
    ConversationStarter {
        id: "fu-1",
        text: "That's interesting — can you tell me more about that?",
        context: "Keep them talking",
    },
    ConversationStarter {
        id: "fu-2",
        text: "How did you handle that challenge?",
        context: "Deepens the conversation",
    },
    ConversationStarter {
        id: "fu-3",
        text: "What would you do differently if you could?",
        context: "Thoughtful follow-up",
    },
    ConversationStarter {
        id: "fu-4",
        text: "What excited you most about that experience?",
        context: "Positive direction",
    },
    ConversationStarter {
        id: "fu-5",
        text: "That resonates with me — I've been thinking about something similar.",
        context: "Build connection",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfidenceBooster {
    pub id: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
}

pub static CONFIDENCE_BOOSTERS: [ConfidenceBooster; 4] = [
    ConfidenceBooster {
        id: "cb-1",
        text: "Remember: asking questions is a superpower. Curious people are magnetic.",
        icon: "Sparkles",
    },
    ConfidenceBooster {
        id: "cb-2",
        text: "It's okay to pause. Thoughtful silence shows you're really listening.",
        icon: "Heart",
    },
    ConfidenceBooster {
        id: "cb-3",
        text: "You don't need to have all the answers. 'I'd love to learn more about that' is a perfect response.",
        icon: "Lightbulb",
    },
    ConfidenceBooster {
        id: "cb-4",
        text: "If a conversation isn't flowing, it's fine to exit gracefully: 'Great meeting you — I'm going to grab a drink!'",
        icon: "ArrowRight",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUpTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub template: &'static str,
    pub context: &'static str,
}

impl FollowUpTemplate {
    pub fn render(&self, values: &BTreeMap<String, String>) -> String {
        render_template(self.template, values)
    }

    pub fn find(id: &str) -> Option<&'static FollowUpTemplate> {
        FOLLOW_UP_TEMPLATES.iter().find(|template| template.id == id)
    }
}

pub static FOLLOW_UP_TEMPLATES: [FollowUpTemplate; 4] = [
    FollowUpTemplate {
        id: "fup-1",
        title: "Quick Connect",
        template: "Hi {name}, it was great meeting you at {event}. I really enjoyed our conversation about {topic}. Let's stay in touch!",
        context: "LinkedIn / casual follow-up",
    },
    FollowUpTemplate {
        id: "fup-2",
        title: "Value Add",
        template: "Hi {name}, great connecting at {event}. You mentioned {topic} — I thought you might find this interesting: {resource}. Hope it's helpful!",
        context: "When you have something to share",
    },
    FollowUpTemplate {
        id: "fup-3",
        title: "Coffee Chat Request",
        template: "Hi {name}, I really enjoyed our conversation at {event}. I'd love to learn more about your experience in {field}. Would you be open to a 20-minute coffee chat sometime?",
        context: "When you want to continue the relationship",
    },
    FollowUpTemplate {
        id: "fup-4",
        title: "Thank You",
        template: "Hi {name}, thank you for sharing your insights about {topic} at {event}. Your advice on {advice} was really helpful and I'll definitely be acting on it.",
        context: "After a mentorship-style conversation",
    },
];

/// Substitute `{key}` placeholders. Placeholders without a non-blank value
/// are left in place so the user can see what still needs filling in.
pub fn render_template(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            rendered.push_str(&rest[open..]);
            return rendered;
        };

        let key = &after_open[..close];
        match values.get(key).map(|value| value.trim()) {
            Some(value) if !value.is_empty() => rendered.push_str(value),
            _ => {
                rendered.push('{');
                rendered.push_str(key);
                rendered.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }

    rendered.push_str(rest);
    rendered
}

pub static REFLECTION_PROMPTS: [&str; 5] = [
    "What went well in your interactions today?",
    "What's one thing you learned about someone?",
    "Did you feel more confident than you expected?",
    "What would you try differently next time?",
    "Who did you most enjoy talking to, and why?",
];

pub static REINFORCEMENTS: [&str; 5] = [
    "You showed up and put yourself out there — that takes real courage. 💪",
    "Every conversation is practice. You're building a skill most people avoid.",
    "Networking gets easier every time. You're already further than you think.",
    "The hardest part was showing up, and you did it. Well done! ✨",
    "Remember: relationships take time. Today's small step could lead to big things.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntroField {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub hint: &'static str,
}

pub static INTRO_FIELDS: [IntroField; 3] = [
    IntroField {
        key: "whoIAm",
        label: "Who I am",
        placeholder: "e.g. I'm a final-year design student at UCL",
        hint: "Your current role or situation",
    },
    IntroField {
        key: "whatIDo",
        label: "What I do",
        placeholder: "e.g. I focus on UX research and interaction design",
        hint: "Your area of work or study",
    },
    IntroField {
        key: "whatImExploring",
        label: "What I'm exploring",
        placeholder: "e.g. I'm looking into accessibility in fintech",
        hint: "What you're curious about or working toward",
    },
];

pub const INTRO_EXAMPLE: &str = "I'm a final-year design student at UCL. I focus on UX research and interaction design. I'm looking into accessibility in fintech.";

/// Self-introduction answers, joined into one spoken line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntroDraft {
    pub who_i_am: String,
    pub what_i_do: String,
    pub what_im_exploring: String,
}

impl IntroDraft {
    /// Non-blank parts joined with ". " and closed with a full stop; empty
    /// when nothing was filled in.
    pub fn format(&self) -> String {
        let parts: Vec<&str> = [&self.who_i_am, &self.what_i_do, &self.what_im_exploring]
            .into_iter()
            .map(|part| part.trim().trim_end_matches('.'))
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            return String::new();
        }
        format!("{}.", parts.join(". "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolboxItem {
    pub id: &'static str,
    pub text: &'static str,
    pub tip: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolboxCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: &'static [ToolboxItem],
}

pub static TOOLBOX: [ToolboxCategory; 4] = [
    ToolboxCategory {
        id: "in-person",
        label: "In-Person",
        icon: "Users",
        items: &[
            ToolboxItem { id: "ip-1", text: "What brought you here today?", tip: "Universal and natural" },
            ToolboxItem { id: "ip-2", text: "How do you know the host / organiser?", tip: "Creates common ground" },
            ToolboxItem { id: "ip-3", text: "I'm [name] — I'm really interested in [topic]. What about you?", tip: "Direct but warm" },
            ToolboxItem { id: "ip-4", text: "Have you been to events like this before?", tip: "Easy conversation starter" },
            ToolboxItem { id: "ip-5", text: "That was a great talk — what did you think about [point]?", tip: "After a presentation" },
            ToolboxItem { id: "ip-6", text: "I love your [accessory/shirt/badge] — is there a story behind it?", tip: "Genuine compliment opener" },
            ToolboxItem { id: "ip-7", text: "Excuse me, mind if I join you? I don't know many people here.", tip: "Honest and relatable" },
            ToolboxItem { id: "ip-8", text: "What's your favourite thing about working in [industry]?", tip: "Positive and engaging" },
        ],
    },
    ToolboxCategory {
        id: "online",
        label: "Online",
        icon: "Monitor",
        items: &[
            ToolboxItem { id: "on-1", text: "Hi everyone! I'm [name], joining from [location]. Excited to learn about [topic].", tip: "Introduce yourself in chat" },
            ToolboxItem { id: "on-2", text: "Great point about [topic] — I've experienced something similar in my work with [area].", tip: "Engage during Q&A" },
            ToolboxItem { id: "on-3", text: "Would love to connect after this session if anyone is working on [topic].", tip: "Signal openness" },
            ToolboxItem { id: "on-4", text: "That's a perspective I hadn't considered — could you elaborate?", tip: "Thoughtful follow-up" },
            ToolboxItem { id: "on-5", text: "I really resonated with what [speaker] said about [point]. Anyone else?", tip: "Open discussion" },
            ToolboxItem { id: "on-6", text: "[Name], your question about [topic] was really insightful. Let's chat after!", tip: "Direct reach-out" },
        ],
    },
    ToolboxCategory {
        id: "linkedin",
        label: "LinkedIn",
        icon: "Linkedin",
        items: &[
            ToolboxItem { id: "li-1", text: "Hi [name], I came across your profile and was really impressed by your work in [field]. Would love to connect!", tip: "Cold outreach" },
            ToolboxItem { id: "li-2", text: "Hi [name], we met at [event] and I really enjoyed our conversation about [topic]. Great to connect here!", tip: "Post-event connect" },
            ToolboxItem { id: "li-3", text: "Hi [name], I'm exploring a career in [field] and your journey from [A] to [B] is really inspiring. Would you be open to a brief chat?", tip: "Mentorship request" },
            ToolboxItem { id: "li-4", text: "Your post about [topic] really resonated with me. I've been working on [related thing] — would love to exchange ideas.", tip: "Content-based outreach" },
            ToolboxItem { id: "li-5", text: "Hi [name], [mutual connection] suggested I reach out. I'd love to learn more about your experience at [company].", tip: "Referral intro" },
        ],
    },
    ToolboxCategory {
        id: "closers",
        label: "Closers",
        icon: "LogOut",
        items: &[
            ToolboxItem { id: "cl-1", text: "This has been great — would you be open to connecting on LinkedIn?", tip: "Natural transition" },
            ToolboxItem { id: "cl-2", text: "I've really enjoyed chatting. I'll let you mingle — hope we cross paths again!", tip: "Graceful exit" },
            ToolboxItem { id: "cl-3", text: "Thank you for sharing your insights — I'll definitely look into [thing they mentioned].", tip: "Shows you listened" },
            ToolboxItem { id: "cl-4", text: "I'd love to continue this conversation — would a coffee chat sometime work for you?", tip: "Proactive follow-up" },
            ToolboxItem { id: "cl-5", text: "It was great meeting you, [name]. I'm going to check out [other area], but let's keep in touch!", tip: "Using their name" },
            ToolboxItem { id: "cl-6", text: "I don't want to keep you, but I really appreciate your time. Enjoy the rest of the event!", tip: "Respectful close" },
        ],
    },
];

pub fn toolbox_category(id: &str) -> Option<&'static ToolboxCategory> {
    TOOLBOX.iter().find(|category| category.id == id)
}
